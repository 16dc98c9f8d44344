//! Desk layout inside one room.
//!
//! Students are grouped by class level and the levels take turns filling
//! seats, two seats per desk, so neighbours on a desk tend to sit different
//! exams. This is best effort: once only one level is left in the tail of a
//! room, its students fill the remaining desks side by side.

use crate::data::StudentRecord;
use log::debug;
use serde::Serialize;
use std::collections::{HashMap, VecDeque};

/// Default number of desks per printed row.
pub const DESKS_PER_ROW: usize = 3;

/// Class level of an origin group: its leading digits ("9/A" -> "9",
/// "10. Sınıf / B" -> "10"), or the trimmed group when it has none.
pub fn class_level(group: &str) -> &str {
    let trimmed = group.trim();
    let digits = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    if digits == 0 { trimmed } else { &trimmed[..digits] }
}

/// A two-seat desk, numbered from 1 in layout order.
#[derive(Debug, Clone, Serialize)]
pub struct Desk<'a> {
    pub number: usize,
    pub seats: [Option<&'a StudentRecord>; 2],
}

impl<'a> Desk<'a> {
    fn new(number: usize) -> Self {
        Desk {
            number,
            seats: [None, None],
        }
    }

    pub fn left(&self) -> Option<&'a StudentRecord> {
        self.seats[0]
    }

    pub fn right(&self) -> Option<&'a StudentRecord> {
        self.seats[1]
    }

    pub fn is_full(&self) -> bool {
        self.seats.iter().all(Option::is_some)
    }

    fn next_free_seat(&mut self) -> Option<&mut Option<&'a StudentRecord>> {
        self.seats.iter_mut().find(|seat| seat.is_none())
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SeatingPlan<'a> {
    pub desks: Vec<Desk<'a>>,
}

impl<'a> SeatingPlan<'a> {
    pub fn len(&self) -> usize {
        self.desks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.desks.is_empty()
    }

    /// Students in seat order, left seat before right.
    pub fn seated(&self) -> impl Iterator<Item = &'a StudentRecord> + '_ {
        self.desks.iter().flat_map(|d| d.seats.iter().flatten().copied())
    }

    /// Desks in row-major blocks for the printed floor plan. A width of 0
    /// is treated as 1.
    pub fn rows(&self, desks_per_row: usize) -> Vec<&[Desk<'a>]> {
        self.desks.chunks(desks_per_row.max(1)).collect()
    }

    fn seat(&mut self, student: &'a StudentRecord) {
        if self.desks.last().is_none_or(Desk::is_full) {
            let number = self.desks.len() + 1;
            self.desks.push(Desk::new(number));
        }
        if let Some(seat) = self.desks.last_mut().and_then(Desk::next_free_seat) {
            *seat = Some(student);
        }
    }
}

/// Arranges a room's students into desks. The input is only borrowed; every
/// student appears in exactly one seat and only the last desk can be half
/// empty.
pub fn layout(students: &[StudentRecord]) -> SeatingPlan<'_> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut levels: Vec<VecDeque<&StudentRecord>> = Vec::new();
    for student in students {
        let level = class_level(&student.origin_group);
        let slot = *index.entry(level).or_insert_with(|| {
            levels.push(VecDeque::new());
            levels.len() - 1
        });
        levels[slot].push_back(student);
    }

    let mut plan = SeatingPlan::default();
    let mut remaining = students.len();
    while remaining > 0 {
        for queue in &mut levels {
            if let Some(student) = queue.pop_front() {
                plan.seat(student);
                remaining -= 1;
            }
        }
    }

    debug!(
        "Seated {} students at {} desks across {} levels",
        students.len(),
        plan.len(),
        levels.len()
    );
    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn student(no: &str, group: &str) -> StudentRecord {
        StudentRecord {
            student_no: no.to_string(),
            first_name: "Deniz".to_string(),
            last_name: "Kaya".to_string(),
            origin_group: group.to_string(),
        }
    }

    fn levels_of<'a>(desk: &Desk<'a>) -> Vec<&'a str> {
        desk.seats
            .iter()
            .flatten()
            .map(|s| class_level(&s.origin_group))
            .collect()
    }

    #[test]
    fn test_class_level() {
        assert_eq!(class_level("9/A"), "9");
        assert_eq!(class_level("10. Sınıf / B Şubesi"), "10");
        assert_eq!(class_level(" 11-C"), "11");
        assert_eq!(class_level("Prep/A"), "Prep/A");
        assert_eq!(class_level(""), "");
    }

    #[test]
    fn test_class_level_ignores_surrounding_whitespace() {
        assert_eq!(class_level(" Prep "), "Prep");
        assert_eq!(class_level(" Prep"), class_level("Prep"));
    }

    #[test]
    fn test_padded_group_names_share_a_level() {
        let students = vec![
            student("1", "Prep"),
            student("2", " Prep"),
            student("3", "9/A"),
            student("4", "9/B"),
        ];

        let plan = layout(&students);

        assert_eq!(levels_of(&plan.desks[0]), vec!["Prep", "9"]);
        assert_eq!(levels_of(&plan.desks[1]), vec!["Prep", "9"]);
    }

    #[test]
    fn test_two_levels_alternate_within_desks() {
        let students = vec![
            student("1", "9/A"),
            student("2", "9/B"),
            student("3", "10/A"),
            student("4", "10/B"),
        ];

        let plan = layout(&students);

        assert_eq!(plan.len(), 2);
        for desk in &plan.desks {
            assert_eq!(levels_of(desk), vec!["9", "10"]);
        }
        assert_eq!(plan.desks[0].left().unwrap().student_no, "1");
        assert_eq!(plan.desks[0].right().unwrap().student_no, "3");
        assert_eq!(plan.desks[1].left().unwrap().student_no, "2");
        assert_eq!(plan.desks[1].right().unwrap().student_no, "4");
    }

    #[test]
    fn test_empty_input_gives_empty_plan() {
        let plan = layout(&[]);

        assert!(plan.is_empty());
        assert!(plan.rows(DESKS_PER_ROW).is_empty());
    }

    #[test]
    fn test_odd_count_leaves_last_seat_empty() {
        let students: Vec<StudentRecord> = (0..5)
            .map(|i| student(&i.to_string(), if i % 2 == 0 { "9/A" } else { "10/A" }))
            .collect();

        let plan = layout(&students);

        assert_eq!(plan.len(), 3);
        assert!(plan.desks[..2].iter().all(Desk::is_full));
        let last = plan.desks.last().unwrap();
        assert!(last.left().is_some());
        assert!(last.right().is_none());
    }

    #[test]
    fn test_every_student_seated_once() {
        let groups = ["9/A", "9/B", "10/A", "11/C", "Prep"];
        let students: Vec<StudentRecord> = (0..23)
            .map(|i| student(&format!("{i}"), groups[i % 3 + (i % 7) / 4]))
            .collect();

        let plan = layout(&students);

        let seated: Vec<&str> = plan.seated().map(|s| s.student_no.as_str()).collect();
        let unique: HashSet<&str> = seated.iter().copied().collect();
        assert_eq!(seated.len(), students.len());
        assert_eq!(unique.len(), students.len());
        assert_eq!(plan.len(), 12);
        assert_eq!(plan.desks.iter().filter(|d| !d.is_full()).count(), 1);
        for (i, desk) in plan.desks.iter().enumerate() {
            assert_eq!(desk.number, i + 1);
        }
    }

    #[test]
    fn test_single_level_tail_sits_together() {
        let students = vec![
            student("1", "9/A"),
            student("2", "9/A"),
            student("3", "9/A"),
            student("4", "10/A"),
        ];

        let plan = layout(&students);

        assert_eq!(levels_of(&plan.desks[0]), vec!["9", "10"]);
        assert_eq!(levels_of(&plan.desks[1]), vec!["9", "9"]);
    }

    #[test]
    fn test_rows_chunk_desks() {
        let students: Vec<StudentRecord> =
            (0..14).map(|i| student(&i.to_string(), "9/A")).collect();

        let plan = layout(&students);
        let rows = plan.rows(DESKS_PER_ROW);

        assert_eq!(plan.len(), 7);
        let widths: Vec<usize> = rows.iter().map(|r| r.len()).collect();
        assert_eq!(widths, vec![3, 3, 1]);
        assert_eq!(plan.rows(0).len(), 7);
    }

    #[test]
    fn test_layout_does_not_touch_input_order() {
        let students = vec![student("1", "10/A"), student("2", "9/A"), student("3", "10/A")];
        let before = students.clone();

        let plan = layout(&students);

        assert_eq!(students, before);
        assert_eq!(plan.desks[0].left().unwrap().student_no, "1");
        assert_eq!(plan.desks[0].right().unwrap().student_no, "2");
    }
}
