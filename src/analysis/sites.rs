//! Launch site name resolution.
//!
//! Launch records carry no site information of their own, so grouping by
//! site goes through a [`SiteNameResolver`]. The default resolver keys on the
//! launch id, which in practice puts every launch in its own group.

use crate::models::Launch;

/// Label used when no better site name can be derived.
pub const UNKNOWN_SITE: &str = "Unknown Site";

/// Strategy for deriving a site label from a launch record.
pub trait SiteNameResolver {
    /// Returns the site label used as grouping key for `launch`.
    fn site_name(&self, launch: &Launch) -> String;
}

/// Uses the launch id as the site name for named launches.
///
/// This is a placeholder heuristic: ids are unique per launch, so each named
/// launch forms its own "site". Supply a different resolver to group by a
/// real launchpad.
#[derive(Debug, Clone, Copy, Default)]
pub struct LaunchIdResolver;

impl SiteNameResolver for LaunchIdResolver {
    fn site_name(&self, launch: &Launch) -> String {
        if launch.name.trim().is_empty() {
            return UNKNOWN_SITE.to_string();
        }

        launch
            .id
            .clone()
            .unwrap_or_else(|| UNKNOWN_SITE.to_string())
    }
}

impl<F> SiteNameResolver for F
where
    F: Fn(&Launch) -> String,
{
    fn site_name(&self, launch: &Launch) -> String {
        self(launch)
    }
}
