//! Obituary ranking and formatting.
//!
//! Robots are ranked by boxes delivered, then by time survived, both
//! descending. The sort is stable so exact ties keep roster order.

use std::cmp::Ordering;

use crate::record::{Cause, NameRecord};

/// Comparator for the obituary board: most boxes first, then longest-lived.
pub fn rank(a: &NameRecord, b: &NameRecord) -> Ordering {
    b.boxes_delivered.cmp(&a.boxes_delivered).then_with(|| {
        b.time_survived
            .partial_cmp(&a.time_survived)
            .unwrap_or(Ordering::Equal)
    })
}

/// Sort records in place using [`rank`].
pub fn sort_ranked(records: &mut [&NameRecord]) {
    records.sort_by(|a, b| rank(a, b));
}

/// Whole seconds shown on the board. Halves round to the even neighbour.
pub fn display_seconds(time_survived: f32) -> i64 {
    time_survived.round_ties_even() as i64
}

/// Format one obituary line.
///
/// Records that are still alive use the [`Cause::Unknown`] phrase.
pub fn format_obituary(record: &NameRecord) -> String {
    let cause = record.fate.cause().unwrap_or(Cause::Unknown);
    format!(
        "{} delivered {} boxes, {}{} seconds.",
        record.name,
        record.boxes_delivered,
        cause.phrase(),
        display_seconds(record.time_survived)
    )
}

/// Obituaries for every dead record, best first.
pub fn obituaries<'a>(records: impl IntoIterator<Item = &'a NameRecord>) -> Vec<String> {
    let mut dead: Vec<&NameRecord> = records.into_iter().filter(|r| r.is_dead()).collect();
    sort_ranked(&mut dead);
    dead.into_iter().map(format_obituary).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Fate;

    fn dead(name: &str, boxes: u32, time: f32, cause: Cause) -> NameRecord {
        NameRecord {
            used: true,
            fate: Fate::Died(cause),
            time_survived: time,
            boxes_delivered: boxes,
            ..NameRecord::new(name)
        }
    }

    #[test]
    fn test_format_obituary() {
        let record = dead("Bread", 3, 41.6, Cause::Crusher);
        assert_eq!(
            format_obituary(&record),
            "Bread delivered 3 boxes, and was crushed after 42 seconds."
        );
    }

    #[test]
    fn test_display_seconds_rounds_half_to_even() {
        assert_eq!(display_seconds(2.5), 2);
        assert_eq!(display_seconds(3.5), 4);
        assert_eq!(display_seconds(10.49), 10);
        assert_eq!(display_seconds(0.0), 0);
    }

    #[test]
    fn test_rank_boxes_then_time() {
        let a = dead("A", 2, 10.0, Cause::Pit);
        let b = dead("B", 5, 1.0, Cause::Pit);
        let c = dead("C", 2, 30.0, Cause::Pit);
        let mut list = vec![&a, &b, &c];
        sort_ranked(&mut list);
        let names: Vec<_> = list.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["B", "C", "A"]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let a = dead("First", 1, 5.0, Cause::Bomb);
        let b = dead("Second", 1, 5.0, Cause::Fire);
        let lines = obituaries([&a, &b]);
        assert!(lines[0].starts_with("First"));
        assert!(lines[1].starts_with("Second"));
    }

    #[test]
    fn test_living_robots_excluded() {
        let alive = NameRecord {
            used: true,
            boxes_delivered: 9,
            ..NameRecord::new("Zeek")
        };
        let gone = dead("Nora", 0, 12.0, Cause::Fire);
        let lines = obituaries([&alive, &gone]);
        assert_eq!(
            lines,
            vec!["Nora delivered 0 boxes, and got fired after 12 seconds.".to_string()]
        );
    }
}
