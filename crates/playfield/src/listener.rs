use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("a listener is already attached to this slot")]
pub struct ListenerSetError;

/// Holds at most one listener.
///
/// An occupied slot must be cleared with `set(None)` before a different
/// listener can be attached; silently replacing a listener is not allowed.
#[derive(Debug)]
pub struct ListenerSlot<T> {
    listener: Option<T>,
}

impl<T> Default for ListenerSlot<T> {
    fn default() -> Self {
        Self { listener: None }
    }
}

impl<T> ListenerSlot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, listener: Option<T>) -> Result<(), ListenerSetError> {
        if self.listener.is_some() && listener.is_some() {
            return Err(ListenerSetError);
        }
        self.listener = listener;
        Ok(())
    }

    pub fn get(&self) -> Option<&T> {
        self.listener.as_ref()
    }

    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.listener.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_slot_accepts_a_listener() {
        let mut slot = ListenerSlot::new();
        assert!(slot.set(Some(7)).is_ok());
        assert_eq!(slot.get(), Some(&7));
    }

    #[test]
    fn occupied_slot_rejects_a_second_listener() {
        let mut slot = ListenerSlot::new();
        slot.set(Some(1)).unwrap();
        assert_eq!(slot.set(Some(2)), Err(ListenerSetError));
        assert_eq!(slot.get(), Some(&1));
    }

    #[test]
    fn clearing_then_setting_succeeds() {
        let mut slot = ListenerSlot::new();
        slot.set(Some(1)).unwrap();
        slot.set(None).unwrap();
        assert!(slot.set(Some(2)).is_ok());
        assert_eq!(slot.get(), Some(&2));
    }
}
