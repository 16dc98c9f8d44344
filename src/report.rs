use crate::data::{Assignment, ExamInfo, GroupName, RoomRecord, StudentRecord};
use crate::seating::{Desk, SeatingPlan};
use itertools::Itertools;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Printable view of one room: students sorted for the door list plus the
/// group breakdown.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomReport {
    pub room: RoomRecord,
    pub students: Vec<StudentRecord>,
    pub group_counts: BTreeMap<GroupName, usize>,
    pub total_students: usize,
    /// Percent of the room's seats in use, rounded.
    pub occupancy_rate: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupStats {
    pub total_students: usize,
    /// Room names in first-seen order.
    pub rooms: Vec<String>,
    pub room_count: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionSummary {
    pub total_students: usize,
    pub total_rooms: usize,
    pub average_students_per_room: usize,
    pub group_stats: BTreeMap<GroupName, GroupStats>,
}

/// Desks of a seating plan together with their printed rows.
#[derive(Debug, Serialize)]
pub struct SeatingView<'a> {
    pub desks: &'a [Desk<'a>],
    pub rows: Vec<&'a [Desk<'a>]>,
}

impl<'a> SeatingView<'a> {
    pub fn new(plan: &'a SeatingPlan<'a>, desks_per_row: usize) -> Self {
        SeatingView {
            desks: &plan.desks,
            rows: plan.rows(desks_per_row),
        }
    }
}

/// Seating plan of one room as served to clients.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSeating<'a> {
    pub room_id: &'a str,
    pub room_name: &'a str,
    #[serde(flatten)]
    pub plan: SeatingView<'a>,
}

/// Everything a renderer needs for one distribution run.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionReport<'a> {
    pub exam: &'a ExamInfo,
    pub assignment: &'a Assignment,
    pub summary: &'a DistributionSummary,
    pub room_reports: &'a [RoomReport],
    pub seating: &'a [RoomSeating<'a>],
}

// by group, then by student number (numerically when both parse)
fn compare_students(a: &StudentRecord, b: &StudentRecord) -> Ordering {
    a.origin_group.cmp(&b.origin_group).then_with(|| {
        match (a.student_no.parse::<u64>(), b.student_no.parse::<u64>()) {
            (Ok(x), Ok(y)) => x.cmp(&y),
            _ => a.student_no.cmp(&b.student_no),
        }
    })
}

fn percent(part: usize, whole: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    ((part as f64 / f64::from(whole)) * 100.0).round() as u32
}

/// Reports for every room that received students, sorted by room name.
pub fn room_reports(assignment: &Assignment) -> Vec<RoomReport> {
    assignment
        .iter()
        .filter(|a| !a.students.is_empty())
        .map(|a| RoomReport {
            room: a.room.clone(),
            students: a.students.iter().cloned().sorted_by(compare_students).collect(),
            group_counts: a.group_counts(),
            total_students: a.students.len(),
            occupancy_rate: percent(a.students.len(), a.room.capacity),
        })
        .sorted_by(|x, y| x.room.name.cmp(&y.room.name))
        .collect()
}

pub fn summarize(assignment: &Assignment) -> DistributionSummary {
    let total_students = assignment.total_students();
    let total_rooms = assignment.len();

    let rooms_by_group = assignment
        .iter()
        .flat_map(|a| {
            a.students
                .iter()
                .map(move |s| (s.origin_group.clone(), a.room.name.clone()))
        })
        .into_group_map();

    let group_stats = rooms_by_group
        .into_iter()
        .map(|(group, rooms)| {
            let total_students = rooms.len();
            let rooms: Vec<String> = rooms.into_iter().unique().collect();
            let stats = GroupStats {
                total_students,
                room_count: rooms.len(),
                rooms,
            };
            (group, stats)
        })
        .collect();

    let average_students_per_room = if total_rooms == 0 {
        0
    } else {
        (total_students as f64 / total_rooms as f64).round() as usize
    };

    DistributionSummary {
        total_students,
        total_rooms,
        average_students_per_room,
        group_stats,
    }
}
