// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Per-value nodes: filter, map and consecutive-duplicate removal.

use crate::engine::{Input, Output};
use crate::traits::Routine;
use futures::StreamExt;

/// Emit only the values for which `predicate` holds.
pub fn grep<T, P>(mut predicate: P) -> impl Routine<T>
where
    T: 'static,
    P: FnMut(&T) -> bool + 'static,
{
    move |mut input: Input<T>, output: Output<T>| async move {
        while let Some(value) = input.next().await {
            if predicate(&value) {
                output.emit(value).await;
            }
        }
    }
}

/// Emit `f(value)` for every value.
pub fn transform<T, F>(mut f: F) -> impl Routine<T>
where
    T: 'static,
    F: FnMut(T) -> T + 'static,
{
    move |mut input: Input<T>, output: Output<T>| async move {
        while let Some(value) = input.next().await {
            output.emit(f(value)).await;
        }
    }
}

/// Drop every value equal to the one emitted just before it.
///
/// On sorted input this removes all duplicates.
pub fn uniq<T>() -> impl Routine<T>
where
    T: Clone + PartialEq + 'static,
{
    uniq_by(T::clone)
}

/// Like [`uniq`], comparing `key(value)` instead of the whole value.
///
/// Only the key of the last *emitted* value is kept, so the first value of every run
/// passes through.
pub fn uniq_by<T, K, F>(mut key: F) -> impl Routine<T>
where
    T: 'static,
    K: PartialEq + 'static,
    F: FnMut(&T) -> K + 'static,
{
    move |mut input: Input<T>, output: Output<T>| async move {
        let mut previous: Option<K> = None;
        while let Some(value) = input.next().await {
            let current = key(&value);
            if previous.as_ref() != Some(&current) {
                previous = Some(current);
                output.emit(value).await;
            }
        }
    }
}
