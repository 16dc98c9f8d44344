use crate::data::{GroupName, RoomId, RoomRecord, Roster, StudentRecord};
use log::{debug, warn};
use std::collections::HashSet;

/// Resolves the selected room ids against the inventory, largest room first.
/// Unknown ids are skipped; equal capacities keep selection order.
pub fn select_rooms(inventory: &[RoomRecord], selected_ids: &[RoomId]) -> Vec<RoomRecord> {
    let mut seen = HashSet::new();
    let mut rooms: Vec<RoomRecord> = selected_ids
        .iter()
        .filter(|id| seen.insert(id.as_str()))
        .filter_map(|id| {
            let room = inventory.iter().find(|r| &r.id == id);
            if room.is_none() {
                warn!("Selected room {id:?} is not in the inventory, skipping");
            }
            room.cloned()
        })
        .collect();

    rooms.sort_by(|a, b| b.capacity.cmp(&a.capacity));
    debug!("Selected {} of {} rooms", rooms.len(), inventory.len());
    rooms
}

/// Flattens the selected roster groups into one tagged student list,
/// keeping roster order within each group.
pub fn collect_students(roster: &Roster, selected_groups: &[GroupName]) -> Vec<StudentRecord> {
    let mut seen = HashSet::new();
    let mut students = Vec::new();

    for group in selected_groups {
        if !seen.insert(group.as_str()) {
            continue;
        }
        match roster.get(group) {
            Some(entries) => students.extend(
                entries
                    .iter()
                    .map(|entry| StudentRecord::from_entry(entry, group)),
            ),
            None => warn!("Selected group {group:?} is not in the roster, skipping"),
        }
    }

    debug!(
        "Collected {} students from {} groups",
        students.len(),
        seen.len()
    );
    students
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::RosterEntry;

    fn room(id: &str, capacity: u32) -> RoomRecord {
        RoomRecord {
            id: id.to_string(),
            name: format!("Room {id}"),
            capacity,
            floor: "1".to_string(),
            notes: None,
        }
    }

    fn entry(no: &str) -> RosterEntry {
        RosterEntry {
            student_no: no.to_string(),
            first_name: "Ada".to_string(),
            last_name: "Yilmaz".to_string(),
        }
    }

    #[test]
    fn test_select_rooms_sorts_by_capacity_descending() {
        let inventory = vec![room("a", 20), room("b", 30), room("c", 25), room("d", 30)];
        let ids: Vec<String> = ["a", "b", "c", "d"].iter().map(|s| s.to_string()).collect();

        let selected = select_rooms(&inventory, &ids);
        let order: Vec<&str> = selected.iter().map(|r| r.id.as_str()).collect();

        assert_eq!(order, vec!["b", "d", "c", "a"]);
    }

    #[test]
    fn test_select_rooms_skips_unknown_and_duplicate_ids() {
        let inventory = vec![room("a", 20), room("b", 30)];
        let ids: Vec<String> = ["a", "zz", "a"].iter().map(|s| s.to_string()).collect();

        let selected = select_rooms(&inventory, &ids);

        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].id, "a");
    }

    #[test]
    fn test_collect_students_tags_group_and_keeps_order() {
        let mut roster = Roster::new();
        roster.insert("9/A".to_string(), vec![entry("12"), entry("3")]);
        roster.insert("10/B".to_string(), vec![entry("7")]);
        let selected = vec!["10/B".to_string(), "9/A".to_string(), "11/C".to_string()];

        let students = collect_students(&roster, &selected);

        let tagged: Vec<(&str, &str)> = students
            .iter()
            .map(|s| (s.student_no.as_str(), s.origin_group.as_str()))
            .collect();
        assert_eq!(tagged, vec![("7", "10/B"), ("12", "9/A"), ("3", "9/A")]);
    }

    #[test]
    fn test_collect_students_ignores_repeated_group() {
        let mut roster = Roster::new();
        roster.insert("9/A".to_string(), vec![entry("1"), entry("2")]);
        let selected = vec!["9/A".to_string(), "9/A".to_string()];

        assert_eq!(collect_students(&roster, &selected).len(), 2);
    }
}
