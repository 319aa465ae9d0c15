#[cfg(feature = "loom")]
mod imp {
    pub(crate) use loom::{
        cell::UnsafeCell,
        sync::atomic::{AtomicBool, AtomicU64, Ordering},
    };
}

#[cfg(not(feature = "loom"))]
mod imp {
    pub(crate) use core::{
        cell::UnsafeCell,
        sync::atomic::{AtomicBool, AtomicU64, Ordering},
    };
}

pub(crate) use imp::*;
