#![forbid(unsafe_code)]

//! Grid serialization strategy.
//!
//! Every grid operation runs inside [`GridLock::with`]. The default build
//! uses a plain mutex: re-entering the grid from a host callback deadlocks.
//! With the `reentrant-lock` feature the same thread may re-acquire the
//! lock, and the inner `RefCell` turns the nested mutable access into an
//! immediate panic that points at the offending callback.

#[cfg(not(feature = "reentrant-lock"))]
mod strategy {
    use parking_lot::Mutex;

    pub(crate) struct GridLock<T> {
        inner: Mutex<T>,
    }

    impl<T> GridLock<T> {
        pub(crate) fn new(value: T) -> Self {
            Self {
                inner: Mutex::new(value),
            }
        }

        #[inline]
        pub(crate) fn with<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
            f(&mut self.inner.lock())
        }
    }
}

#[cfg(feature = "reentrant-lock")]
mod strategy {
    use parking_lot::ReentrantMutex;
    use std::cell::RefCell;

    pub(crate) struct GridLock<T> {
        inner: ReentrantMutex<RefCell<T>>,
    }

    impl<T> GridLock<T> {
        pub(crate) fn new(value: T) -> Self {
            Self {
                inner: ReentrantMutex::new(RefCell::new(value)),
            }
        }

        #[inline]
        pub(crate) fn with<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
            let guard = self.inner.lock();
            let mut state = guard.borrow_mut();
            f(&mut state)
        }
    }
}

pub(crate) use strategy::GridLock;

#[cfg(test)]
mod tests {
    use super::GridLock;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn with_serializes_across_threads() {
        let lock = Arc::new(GridLock::new(0u32));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let lock = Arc::clone(&lock);
                thread::spawn(move || {
                    for _ in 0..1000 {
                        lock.with(|n| *n += 1);
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().expect("worker");
        }
        assert_eq!(lock.with(|n| *n), 4000);
    }
}
