//! Grouping configuration.

use crate::{GroupError, GroupResult};

/// Configuration for [`crate::group_meshlets`].
///
/// # Examples
///
/// ```
/// use meshlet_group::GroupParams;
///
/// let params = GroupParams::default().with_target_group_size(8);
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupParams {
    /// Desired number of meshlets per group. Default 4.
    pub target_group_size: usize,
}

impl Default for GroupParams {
    fn default() -> Self {
        Self {
            target_group_size: 4,
        }
    }
}

impl GroupParams {
    /// Set the desired meshlets-per-group count.
    #[must_use]
    pub const fn with_target_group_size(mut self, target_group_size: usize) -> Self {
        self.target_group_size = target_group_size;
        self
    }

    /// Check the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GroupError::InvalidGroupSize`] when the target is below 2
    /// (a group of one meshlet cannot make coarsening progress).
    pub fn validate(&self) -> GroupResult<()> {
        if self.target_group_size < 2 {
            return Err(GroupError::InvalidGroupSize {
                size: self.target_group_size,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_valid() {
        assert!(GroupParams::default().validate().is_ok());
        assert_eq!(GroupParams::default().target_group_size, 4);
    }

    #[test]
    fn test_rejects_tiny_groups() {
        assert!(GroupParams::default()
            .with_target_group_size(1)
            .validate()
            .is_err());
    }
}
