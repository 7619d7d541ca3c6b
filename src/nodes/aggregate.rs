// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::engine::{Input, Output};
use crate::traits::Routine;
use futures::StreamExt;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::hash::Hash;

/// Group values by `key_func(value)` and emit a group once `close_func(group)` holds.
///
/// `close_func` is evaluated each time a value is appended, with the group in arrival
/// order. A closed group is emitted as `T::from(group)` and forgotten, so a later value
/// with the same key starts a new group. Groups that never close stay in memory until
/// the graph terminates and are then discarded without being emitted.
pub fn aggregate<T, K, KF, CF>(mut key_func: KF, mut close_func: CF) -> impl Routine<T>
where
    T: From<Vec<T>> + 'static,
    K: Eq + Hash + 'static,
    KF: FnMut(&T) -> K + 'static,
    CF: FnMut(&[T]) -> bool + 'static,
{
    move |mut input: Input<T>, output: Output<T>| async move {
        let mut open: HashMap<K, Vec<T>> = HashMap::new();
        while let Some(value) = input.next().await {
            let closed = match open.entry(key_func(&value)) {
                Entry::Occupied(mut entry) => {
                    entry.get_mut().push(value);
                    if close_func(entry.get()) {
                        Some(entry.remove())
                    } else {
                        None
                    }
                }
                Entry::Vacant(entry) => {
                    let group = vec![value];
                    if close_func(&group) {
                        Some(group)
                    } else {
                        entry.insert(group);
                        None
                    }
                }
            };

            if let Some(group) = closed {
                output.emit(T::from(group)).await;
            }
        }
    }
}
