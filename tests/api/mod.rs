mod capture_handle;
mod media_devices_handle;
mod recorder_handle;
