//! Argument checks run on the caller's thread before anything is queued.

use webbridge_common::{BridgeError, InstanceId, Rect};

use crate::envelope::BRIDGE_INSTANCE;

pub(super) fn instance(id: InstanceId) -> Result<(), BridgeError> {
    if id == BRIDGE_INSTANCE {
        return Err(BridgeError::InvalidArgument(format!(
            "{id} is reserved for bridge-wide events"
        )));
    }
    Ok(())
}

/// `std::thread::Builder::name` panics on interior NULs.
pub(super) fn thread_name(name: &str) -> Result<(), BridgeError> {
    if name.contains('\0') {
        return Err(BridgeError::InvalidArgument(
            "thread name must not contain NUL bytes".into(),
        ));
    }
    Ok(())
}

pub(super) fn url(url: &str) -> Result<(), BridgeError> {
    if url.trim().is_empty() {
        return Err(BridgeError::InvalidArgument("url must not be empty".into()));
    }
    Ok(())
}

pub(super) fn bounds(bounds: &Rect) -> Result<(), BridgeError> {
    if !bounds.has_valid_size() {
        return Err(BridgeError::InvalidArgument(format!(
            "bounds must have non-negative size, got {}x{}",
            bounds.width, bounds.height
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_instance_rejected() {
        assert!(instance(BRIDGE_INSTANCE).is_err());
        assert!(instance(InstanceId(1)).is_ok());
    }

    #[test]
    fn thread_name_rejects_nul() {
        assert!(thread_name("native-dispatch").is_ok());
        assert!(thread_name("").is_ok());
        assert!(matches!(
            thread_name("a\0b"),
            Err(BridgeError::InvalidArgument(_))
        ));
    }

    #[test]
    fn blank_urls_rejected() {
        assert!(url("").is_err());
        assert!(url("   ").is_err());
        assert!(url("about:blank").is_ok());
    }

    #[test]
    fn zero_size_is_allowed_negative_is_not() {
        assert!(bounds(&Rect::new(-10, -10, 0, 0)).is_ok());
        let err = bounds(&Rect::new(0, 0, -1, 5)).unwrap_err();
        assert_eq!(
            err,
            BridgeError::InvalidArgument("bounds must have non-negative size, got -1x5".into())
        );
        assert!(bounds(&Rect::new(0, 0, 5, -1)).is_err());
    }
}
