//! Reactive bindings to browser media capture APIs.
//!
//! Wraps [getUserMedia()][1], [getDisplayMedia()][2],
//! [enumerateDevices()][3] and [MediaRecorder][4] into handles exposing
//! immutable state snapshots and change subscriptions, so a rendering
//! framework can observe them without polling (see [`store::Store`]).
//!
//! [1]: https://w3.org/TR/mediacapture-streams#dom-mediadevices-getusermedia
//! [2]: https://w3.org/TR/screen-capture#dom-mediadevices-getdisplaymedia
//! [3]: https://tinyurl.com/w3-streams#dom-mediadevices-enumeratedevices
//! [4]: https://w3.org/TR/mediastream-recording#mediarecorder-api

#![allow(clippy::module_name_repetitions)]
#![deny(broken_intra_doc_links)]
#![warn(missing_docs)]

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator.
#[cfg(all(feature = "wee_alloc", target_arch = "wasm32"))]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

pub mod api;
pub mod media;
pub mod platform;
pub mod store;
pub mod utils;

#[doc(inline)]
pub use self::api::*;
