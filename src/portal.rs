//! Portal navigation side effect
//!
//! When the disc enters an exit portal the session leaves for another
//! course, carrying the player and disc state as query parameters merged
//! over the page's own parameters. Entry portals navigate straight back
//! to their stored return reference. Either way the navigation is
//! one-shot and irreversible; the `fired` latch stops re-entrant firing
//! while mid-navigation.

use crate::platform::Navigator;
use crate::round2;
use crate::sim::collision::{PortalKind, PortalSpec};
use crate::sim::disc::Disc;
use crate::sim::state::Player;

/// One-shot portal navigation state
#[derive(Debug, Clone)]
pub struct PortalEffect {
    fired: bool,
    /// URL of the current page, carried as the `ref` return parameter
    page_url: String,
    /// Query parameters the page was loaded with
    page_query: Vec<(String, String)>,
}

impl PortalEffect {
    pub fn new(page_url: &str, page_query: &[(String, String)]) -> Self {
        Self {
            fired: false,
            page_url: page_url.to_string(),
            page_query: page_query.to_vec(),
        }
    }

    /// Build from a full location string, splitting off any query part
    pub fn from_location(location: &str) -> Self {
        match location.split_once('?') {
            Some((url, query)) => Self::new(url, &parse_query(query)),
            None => Self::new(location, &[]),
        }
    }

    pub fn fired(&self) -> bool {
        self.fired
    }

    /// Fire the portal. Returns true if a navigation was performed.
    pub fn trigger(
        &mut self,
        spec: &PortalSpec,
        player: &Player,
        disc: &Disc,
        nav: &mut dyn Navigator,
    ) -> bool {
        if self.fired {
            return false;
        }
        match spec.kind {
            PortalKind::Entry => {
                let Some(return_ref) = &spec.return_ref else {
                    log::warn!("Entry portal without a return ref; ignoring");
                    return false;
                };
                self.fired = true;
                nav.navigate(return_ref);
                true
            }
            PortalKind::Exit => {
                let Some(target) = &spec.target_url else {
                    log::warn!("Exit portal without a target url; ignoring");
                    return false;
                };
                let generated = self.build_params(player, disc);
                let merged = merge_query(&self.page_query, &generated);
                let url = format!("{}?{}", target, encode_query(&merged));
                self.fired = true;
                nav.navigate(&url);
                true
            }
        }
    }

    /// Generated parameters, in a fixed order; page keys without a
    /// generated counterpart are appended by the merge
    fn build_params(&self, player: &Player, disc: &Disc) -> Vec<(String, String)> {
        let f2 = |v: f32| format!("{:.2}", round2(v));
        vec![
            ("portal".into(), "true".into()),
            ("username".into(), player.name.clone()),
            ("color".into(), player.color.hex()),
            ("speed".into(), f2(disc.speed())),
            ("speed_x".into(), f2(disc.vel.x)),
            ("speed_y".into(), f2(disc.vel.y)),
            ("speed_z".into(), f2(disc.vel.z)),
            ("ref".into(), self.page_url.clone()),
        ]
    }
}

/// Parse a query string into ordered key/value pairs
pub fn parse_query(query: &str) -> Vec<(String, String)> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (
                urlencoding::decode(key).map(|s| s.into_owned()).unwrap_or_else(|_| key.to_string()),
                urlencoding::decode(value).map(|s| s.into_owned()).unwrap_or_else(|_| value.to_string()),
            )
        })
        .collect()
}

/// Merge generated parameters over pre-existing ones: generated keys win
/// on collision, pre-existing keys with no generated counterpart are
/// preserved after them.
pub fn merge_query(
    existing: &[(String, String)],
    generated: &[(String, String)],
) -> Vec<(String, String)> {
    let mut merged = generated.to_vec();
    for (key, value) in existing {
        if !generated.iter().any(|(k, _)| k == key) {
            merged.push((key.clone(), value.clone()));
        }
    }
    merged
}

/// Serialize pairs as `k=v&k=v` with percent-encoded keys and values
pub fn encode_query(params: &[(String, String)]) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}
