use crate::domain::models::{
    catalog::Location,
    event::{Event, EventMode, ONLINE_LOCATION},
};
use crate::error::AppError;

/// Where and how an event takes place, resolved from the submitted fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub location_id: Option<String>,
    pub location: String,
    pub address: String,
    pub mode: String,
    pub link: String,
}

impl Placement {
    pub fn apply_to(self, event: &mut Event) {
        event.location_id = self.location_id;
        event.location = self.location;
        event.address = self.address;
        event.mode = self.mode;
        event.link = self.link;
    }
}

/// Blank and "0" location ids both mean "no venue".
pub fn normalize_location_id(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|id| !id.is_empty() && *id != "0")
        .map(str::to_string)
}

/// Without a venue the event is online and the address is dropped. With a
/// venue an address is mandatory and the mode defaults to offline. Online
/// events always need a link.
pub fn resolve(venue: Option<&Location>, address: &str, mode: Option<&str>, link: &str) -> Result<Placement, AppError> {
    let link = link.trim().to_string();

    let placement = match venue {
        None => Placement {
            location_id: None,
            location: ONLINE_LOCATION.to_string(),
            address: String::new(),
            mode: EventMode::Online.as_str().to_string(),
            link,
        },
        Some(venue) => {
            let address = address.trim();
            if address.is_empty() {
                return Err(AppError::Validation("Address is required when location is specified".into()));
            }

            let mode = match mode.map(str::trim).filter(|m| !m.is_empty()) {
                Some(raw) => EventMode::parse(raw)
                    .ok_or_else(|| AppError::Validation("Mode must be 'online' or 'offline'".into()))?,
                None => EventMode::Offline,
            };

            Placement {
                location_id: Some(venue.id.clone()),
                location: venue.city.clone(),
                address: address.to_string(),
                mode: mode.as_str().to_string(),
                link,
            }
        }
    };

    if placement.mode == EventMode::Online.as_str() && placement.link.is_empty() {
        return Err(AppError::Validation("Link is required for online events".into()));
    }

    Ok(placement)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bandung() -> Location {
        Location { id: "loc-1".into(), city: "Bandung".into() }
    }

    #[test]
    fn test_normalize_location_id() {
        assert_eq!(normalize_location_id(None), None);
        assert_eq!(normalize_location_id(Some("")), None);
        assert_eq!(normalize_location_id(Some("0")), None);
        assert_eq!(normalize_location_id(Some(" loc-1 ")), Some("loc-1".into()));
    }

    #[test]
    fn test_no_venue_is_online() {
        let placement = resolve(None, "ignored street", Some("offline"), "https://meet").unwrap();
        assert_eq!(placement.location, "Online");
        assert_eq!(placement.address, "");
        assert_eq!(placement.mode, "online");
        assert_eq!(placement.location_id, None);
    }

    #[test]
    fn test_online_requires_link() {
        assert!(matches!(resolve(None, "", None, "  "), Err(AppError::Validation(_))));
        assert!(matches!(resolve(Some(&bandung()), "Jl. 1", Some("online"), ""), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_venue_requires_address_and_defaults_offline() {
        assert!(matches!(resolve(Some(&bandung()), " ", None, ""), Err(AppError::Validation(_))));

        let placement = resolve(Some(&bandung()), "Jl. Asia Afrika 1", None, "").unwrap();
        assert_eq!(placement.location, "Bandung");
        assert_eq!(placement.location_id.as_deref(), Some("loc-1"));
        assert_eq!(placement.mode, "offline");
    }

    #[test]
    fn test_unknown_mode_rejected() {
        assert!(matches!(resolve(Some(&bandung()), "Jl. 1", Some("hybrid"), ""), Err(AppError::Validation(_))));
    }
}
