use crate::engine::EngineInstance;

/// Exclusive owner of one engine instance.
///
/// The handle guarantees that the instance is released exactly once, on every
/// exit path: [`release`](EngineHandle::release) is idempotent and `Drop`
/// performs the release if it has not happened yet, including during
/// unwinding.
pub struct EngineHandle {
    instance: Option<Box<dyn EngineInstance>>,
}

impl EngineHandle {
    pub(crate) fn new(instance: Box<dyn EngineInstance>) -> EngineHandle {
        EngineHandle {
            instance: Some(instance),
        }
    }

    /// Releases the underlying engine instance. Safe to call repeatedly.
    pub fn release(&mut self) {
        if let Some(mut instance) = self.instance.take() {
            instance.release();
        }
    }

    /// Whether the instance has already been released.
    pub fn is_released(&self) -> bool {
        self.instance.is_none()
    }

    /// Panics if the handle was already released; accessing a released
    /// engine instance is a programming error.
    pub(crate) fn instance(&self) -> &dyn EngineInstance {
        self.instance
            .as_deref()
            .expect("engine handle used after release")
    }

    pub(crate) fn instance_mut(&mut self) -> &mut dyn EngineInstance {
        self.instance
            .as_deref_mut()
            .expect("engine handle used after release")
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        self.release();
    }
}
