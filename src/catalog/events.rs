//! Club events.

use std::sync::OnceLock;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Kind of club event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum EventKind {
    /// Regular monthly members' meeting.
    #[serde(rename = "Monthly Meeting")]
    MonthlyMeeting,
    /// Hands-on workshop.
    #[serde(rename = "Workshop")]
    Workshop,
    /// Public exhibition or show.
    #[serde(rename = "Exhibition")]
    Exhibition,
    /// Anything else (swaps, auctions).
    #[serde(rename = "Special Event")]
    SpecialEvent,
}

/// A club event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Event {
    /// Event ID.
    pub id: u32,
    /// Title.
    pub title: String,
    /// Calendar date (YYYY-MM-DD).
    #[schema(value_type = String, format = Date)]
    pub date: NaiveDate,
    /// Human-readable time range.
    pub time: String,
    /// Venue.
    pub location: String,
    /// Short description.
    pub description: String,
    /// Event kind.
    #[serde(rename = "type")]
    pub kind: EventKind,
}

const VENUE: &str = "Riverbanks Botanical Garden";
const MEETING_TIME: &str = "10:00 AM - 12:00 PM";

fn event(
    id: u32,
    title: &str,
    (y, m, d): (i32, u32, u32),
    time: &str,
    description: &str,
    kind: EventKind,
) -> Event {
    Event {
        id,
        title: title.to_string(),
        date: NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
        time: time.to_string(),
        location: VENUE.to_string(),
        description: description.to_string(),
        kind,
    }
}

fn all_events() -> &'static [Event] {
    static EVENTS: OnceLock<Vec<Event>> = OnceLock::new();
    EVENTS.get_or_init(|| {
        vec![
            event(
                1,
                "Monthly Meeting: Spring Repotting",
                (2026, 2, 15),
                MEETING_TIME,
                "Learn the best practices for spring repotting. Bring a tree to work on!",
                EventKind::MonthlyMeeting,
            ),
            event(
                2,
                "Beginner Workshop: Your First Bonsai",
                (2026, 2, 22),
                "1:00 PM - 4:00 PM",
                "A hands-on workshop for beginners. All materials provided. Registration required.",
                EventKind::Workshop,
            ),
            event(
                3,
                "Monthly Meeting: Wiring Techniques",
                (2026, 3, 15),
                MEETING_TIME,
                "Master the art of wiring with demonstrations on various species.",
                EventKind::MonthlyMeeting,
            ),
            event(
                4,
                "Annual Spring Show",
                (2026, 4, 5),
                "9:00 AM - 5:00 PM",
                "Our annual exhibition featuring member trees and guest artists. Free admission.",
                EventKind::Exhibition,
            ),
            event(
                5,
                "Guest Artist: Pine Styling Workshop",
                (2026, 4, 12),
                "9:00 AM - 4:00 PM",
                "Special workshop with visiting artist on advanced pine styling techniques.",
                EventKind::Workshop,
            ),
            event(
                6,
                "Monthly Meeting: Summer Care",
                (2026, 5, 17),
                MEETING_TIME,
                "Prepare your trees for the hot South Carolina summer with proper care techniques.",
                EventKind::MonthlyMeeting,
            ),
            event(
                7,
                "Plant Swap & Auction",
                (2026, 6, 7),
                "10:00 AM - 1:00 PM",
                "Bring trees, pots, and supplies to swap or sell. Proceeds support club activities.",
                EventKind::SpecialEvent,
            ),
            event(
                8,
                "Monthly Meeting: Winter Protection",
                (2026, 1, 18),
                MEETING_TIME,
                "Discussion on protecting tropical and temperate bonsai during cold snaps.",
                EventKind::MonthlyMeeting,
            ),
        ]
    })
}

/// All events, earliest first.
pub fn list_events() -> Vec<Event> {
    let mut events = all_events().to_vec();
    events.sort_by_key(|e| e.date);
    events
}

/// Look up an event by ID.
pub fn find_event(id: u32) -> Option<Event> {
    all_events().iter().find(|e| e.id == id).cloned()
}

/// Split events into upcoming (on or after `today`) and past, keeping order.
pub fn partition_events(events: &[Event], today: NaiveDate) -> (Vec<Event>, Vec<Event>) {
    events.iter().cloned().partition(|e| e.date >= today)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_list_events_sorted_by_date() {
        let events = list_events();
        assert_eq!(events.len(), 8);
        assert!(events.windows(2).all(|w| w[0].date <= w[1].date));
        // The January meeting is listed last in the table but sorts first.
        assert_eq!(events[0].id, 8);
    }

    #[test]
    fn test_find_event() {
        let event = find_event(4).unwrap();
        assert_eq!(event.title, "Annual Spring Show");
        assert_eq!(event.kind, EventKind::Exhibition);
        assert_eq!(event.date, ymd(2026, 4, 5));

        assert!(find_event(0).is_none());
        assert!(find_event(99).is_none());
    }

    #[test]
    fn test_event_serialization() {
        let json = serde_json::to_value(find_event(7).unwrap()).unwrap();
        assert_eq!(json["type"], "Special Event");
        assert_eq!(json["date"], "2026-06-07");
        assert_eq!(json["location"], "Riverbanks Botanical Garden");
    }

    #[test]
    fn test_partition_events() {
        let events = list_events();
        let (upcoming, past) = partition_events(&events, ymd(2026, 3, 15));

        assert_eq!(past.iter().map(|e| e.id).collect::<Vec<_>>(), vec![8, 1, 2]);
        assert_eq!(upcoming.first().map(|e| e.id), Some(3));
        assert_eq!(upcoming.len() + past.len(), events.len());
    }

    #[test]
    fn test_partition_events_all_upcoming() {
        let events = list_events();
        let (upcoming, past) = partition_events(&events, ymd(2025, 1, 1));
        assert_eq!(upcoming.len(), events.len());
        assert!(past.is_empty());
    }
}
