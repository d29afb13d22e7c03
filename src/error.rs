//=========================================================================
// Locomotion Errors
//=========================================================================
//
// Failure taxonomy for the locomotion core.
//
// Both variants are configuration/programming errors: they surface while
// the character is being assembled and abort initialization. Steady-state
// arbitration never produces them because the decision table only names
// actions the catalog has registered.
//
// Calls made before assets are loaded are NOT errors (they are no-ops).
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== LocomotionError =====================================================

/// Errors raised by the action catalog and the animation blender.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocomotionError {
    /// An action name was requested that the catalog never registered.
    #[error("unknown action: {0:?}")]
    UnknownAction(String),

    /// A registration was attempted after the catalog was sealed.
    #[error("catalog is sealed, cannot register action {0:?}")]
    CatalogSealed(String),
}

/// Result alias used throughout the locomotion core.
pub type Result<T> = std::result::Result<T, LocomotionError>;

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_action_display_names_the_action() {
        let err = LocomotionError::UnknownAction("dash".to_string());
        assert_eq!(err.to_string(), "unknown action: \"dash\"");
    }

    #[test]
    fn catalog_sealed_display_names_the_action() {
        let err = LocomotionError::CatalogSealed("jump".to_string());
        assert!(err.to_string().contains("sealed"));
        assert!(err.to_string().contains("jump"));
    }

    #[test]
    fn errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<LocomotionError>();
    }
}
