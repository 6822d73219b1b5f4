//! Plumbing between [`Store`]s and the JS side external store contract
//! (`subscribe(callback) -> unsubscribe` plus `getSnapshot()`).

use std::cell::{Cell, RefCell};

use js_sys::{Function, Object, Reflect};
use wasm_bindgen::prelude::*;

use crate::store::Store;

/// Cache of the JS representation of a [`Store`] snapshot.
///
/// Returns the very same JS object until the [`Store`] version changes, so
/// the JS side is able to compare snapshots by reference.
#[derive(Debug, Default)]
pub(super) struct SnapshotCache {
    /// [`Store`] version the cached value has been built for.
    version: Cell<Option<u64>>,

    /// Cached JS representation.
    value: RefCell<JsValue>,
}

impl SnapshotCache {
    /// Returns the cached JS representation of the provided [`Store`]
    /// snapshot, rebuilding it with the provided function if the [`Store`]
    /// has changed since.
    pub(super) fn get<S, F>(&self, store: &Store<S>, build: F) -> JsValue
    where
        S: Clone + PartialEq + 'static,
        F: FnOnce(S) -> JsValue,
    {
        let version = store.version();
        if self.version.get() != Some(version) {
            self.value.replace(build(store.snapshot()));
            self.version.set(Some(version));
        }
        self.value.borrow().clone()
    }
}

/// Calls the provided JS `callback` without arguments on each change of the
/// provided [`Store`].
///
/// Returns a JS function cancelling the subscription. Calling it more than
/// once is a no-op.
pub(super) fn subscribe<S>(store: &Store<S>, callback: Function) -> Function
where
    S: Clone + PartialEq + 'static,
{
    let subscription = RefCell::new(Some(store.on_change(move |_| {
        if let Err(e) = callback.call0(&JsValue::NULL) {
            log::error!("Store subscriber has thrown: {:?}", e);
        }
    })));
    let unsubscribe = Closure::wrap(Box::new(move || {
        if let Some(subscription) = subscription.borrow_mut().take() {
            subscription.unsubscribe();
        }
    }) as Box<dyn FnMut()>);
    unsubscribe.into_js_value().unchecked_into()
}

/// Sets the `key` property of the provided JS object.
pub(super) fn set_property(obj: &Object, key: &str, value: &JsValue) {
    if let Err(e) = Reflect::set(obj, &JsValue::from_str(key), value) {
        log::error!("Failed to set '{}' snapshot property: {:?}", key, e);
    }
}

/// Builds a frozen JS object of the provided properties.
pub(super) fn frozen_object(props: &[(&str, JsValue)]) -> JsValue {
    let obj = Object::new();
    for (key, value) in props {
        set_property(&obj, key, value);
    }
    Object::freeze(&obj).into()
}
