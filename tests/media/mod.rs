mod capture;
mod devices;
mod recorder;
