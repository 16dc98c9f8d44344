use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

// Type aliases for clarity
pub type RoomId = String;
pub type GroupName = String;

/// A roster row as scraped from the class lists, before it is tagged with its group.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterEntry {
    pub student_no: String,
    pub first_name: String,
    pub last_name: String,
}

/// Group name -> students in roster order.
pub type Roster = HashMap<GroupName, Vec<RosterEntry>>;

/// A student tagged with the group it was rostered under.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    pub student_no: String,
    pub first_name: String,
    pub last_name: String,
    pub origin_group: GroupName,
}

impl StudentRecord {
    pub fn from_entry(entry: &RosterEntry, group: &str) -> Self {
        StudentRecord {
            student_no: entry.student_no.clone(),
            first_name: entry.first_name.clone(),
            last_name: entry.last_name.clone(),
            origin_group: group.to_string(),
        }
    }
}

/// Represents a physical exam room with a given capacity.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomRecord {
    pub id: RoomId,
    pub name: String,
    /// Seats available for the exam, always positive.
    pub capacity: u32,
    #[serde(default)]
    pub floor: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Students placed into one room.
///
/// `students.len() + remaining_capacity == room.capacity` holds for every
/// allocation the engine hands out.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomAllocation {
    pub room: RoomRecord,
    pub students: Vec<StudentRecord>,
    pub remaining_capacity: u32,
}

impl RoomAllocation {
    pub fn new(room: RoomRecord) -> Self {
        let remaining_capacity = room.capacity;
        RoomAllocation {
            room,
            students: Vec::new(),
            remaining_capacity,
        }
    }

    pub fn has_capacity(&self) -> bool {
        self.remaining_capacity > 0
    }

    /// Callers must check `has_capacity` first.
    pub(crate) fn seat(&mut self, student: StudentRecord) {
        debug_assert!(self.has_capacity());
        self.students.push(student);
        self.remaining_capacity -= 1;
    }

    /// Number of students per origin group in this room.
    pub fn group_counts(&self) -> BTreeMap<GroupName, usize> {
        let mut counts = BTreeMap::new();
        for student in &self.students {
            *counts.entry(student.origin_group.clone()).or_insert(0) += 1;
        }
        counts
    }
}

/// The output of the distribution engine, one allocation per room in
/// placement order (descending capacity).
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub rooms: Vec<RoomAllocation>,
}

impl Assignment {
    pub fn get(&self, room_id: &str) -> Option<&RoomAllocation> {
        self.rooms.iter().find(|a| a.room.id == room_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RoomAllocation> {
        self.rooms.iter()
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn total_students(&self) -> usize {
        self.rooms.iter().map(|a| a.students.len()).sum()
    }
}

/// Exam metadata carried through to the reports untouched.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamInfo {
    pub exam_name: String,
    pub exam_date: String,
    pub exam_time: String,
}

/// The complete input for a distribution run.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionRequest {
    pub exam: ExamInfo,
    pub roster: Roster,
    pub rooms: Vec<RoomRecord>,
    pub selected_groups: Vec<GroupName>,
    pub selected_rooms: Vec<RoomId>,
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Input for a stand-alone seating layout of one room.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutRequest {
    pub students: Vec<StudentRecord>,
    #[serde(default)]
    pub desks_per_row: Option<usize>,
}
