use crate::data::{Assignment, GroupName, RoomAllocation, RoomRecord, StudentRecord};
use crate::error::DistributionError;
use log::{debug, info, trace};
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::{HashMap, VecDeque};
use std::time::Instant;

/// Spreads students across rooms so that students of the same origin group
/// end up in different rooms ("butterfly" distribution).
///
/// Every group is shuffled with `rng`, then the groups take turns handing one
/// student to the next room with a free seat. The room cursor is shared by all
/// groups, so consecutive placements rotate through the rooms. Either every
/// student is placed or an error is returned.
pub fn distribute<R: Rng + ?Sized>(
    students: Vec<StudentRecord>,
    rooms: &[RoomRecord],
    rng: &mut R,
) -> Result<Assignment, DistributionError> {
    let start_time = Instant::now();

    let capacity: u64 = rooms.iter().map(|r| u64::from(r.capacity)).sum();
    if students.len() as u64 > capacity {
        return Err(DistributionError::CapacityExceeded {
            students: students.len(),
            capacity,
        });
    }

    let mut ordered_rooms = rooms.to_vec();
    ordered_rooms.sort_by(|a, b| b.capacity.cmp(&a.capacity));

    let total = students.len();
    let groups = group_by_origin(students);
    info!(
        "Distributing {} students from {} groups over {} rooms (capacity {})...",
        total,
        groups.len(),
        ordered_rooms.len(),
        capacity
    );

    let mut placement = Placement::new(groups, ordered_rooms, rng);
    placement.run()?;

    info!("Distribution finished in {:.2?}", start_time.elapsed());
    Ok(placement.into_assignment())
}

/// Shuffled students of one origin group, front is placed next.
#[derive(Debug)]
struct GroupQueue {
    name: GroupName,
    students: VecDeque<StudentRecord>,
}

// groups in order of first appearance
fn group_by_origin(students: Vec<StudentRecord>) -> Vec<GroupQueue> {
    let mut index: HashMap<GroupName, usize> = HashMap::new();
    let mut groups: Vec<GroupQueue> = Vec::new();

    for student in students {
        let slot = *index.entry(student.origin_group.clone()).or_insert_with(|| {
            groups.push(GroupQueue {
                name: student.origin_group.clone(),
                students: VecDeque::new(),
            });
            groups.len() - 1
        });
        groups[slot].students.push_back(student);
    }

    groups
}

fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Placement state: per-group queues, per-room allocations and the shared
/// room cursor. Terminal once every queue is empty.
#[derive(Debug)]
struct Placement {
    groups: Vec<GroupQueue>,
    rooms: Vec<RoomAllocation>,
    cursor: usize,
}

impl Placement {
    fn new<R: Rng + ?Sized>(
        mut groups: Vec<GroupQueue>,
        rooms: Vec<RoomRecord>,
        rng: &mut R,
    ) -> Self {
        for group in &mut groups {
            group.students.make_contiguous().shuffle(rng);
        }
        Placement {
            groups,
            rooms: rooms.into_iter().map(RoomAllocation::new).collect(),
            cursor: 0,
        }
    }

    fn is_done(&self) -> bool {
        self.groups.iter().all(|g| g.students.is_empty())
    }

    fn run(&mut self) -> Result<(), DistributionError> {
        let mut round = 0;
        while !self.is_done() {
            round += 1;
            let placed = self.round()?;
            self.stagger(placed);
            debug!("Round {round}: placed {placed} students, cursor at room {}", self.cursor);
        }
        Ok(())
    }

    /// One student from every non-empty group, in group order.
    fn round(&mut self) -> Result<usize, DistributionError> {
        let mut placed = 0;
        for group_index in 0..self.groups.len() {
            if self.place_next(group_index)? {
                placed += 1;
            }
        }
        Ok(placed)
    }

    /// Moves the front student of a group into the next room with a free
    /// seat. Returns `false` when the group has no students left.
    fn place_next(&mut self, group_index: usize) -> Result<bool, DistributionError> {
        let Some(student) = self.groups[group_index].students.pop_front() else {
            return Ok(false);
        };

        let room_count = self.rooms.len();
        let free_room = (0..room_count)
            .map(|step| (self.cursor + step) % room_count)
            .find(|&i| self.rooms[i].has_capacity());

        let Some(room_index) = free_room else {
            let group = &self.groups[group_index];
            return Err(DistributionError::RoomsExhausted {
                group: group.name.clone(),
                unplaced: group.students.len() + 1,
            });
        };

        trace!(
            "Placing {} ({}) in room {}",
            student.student_no, student.origin_group, self.rooms[room_index].room.id
        );
        self.rooms[room_index].seat(student);
        self.cursor = (room_index + 1) % room_count;
        Ok(true)
    }

    // A round that placed k students moves the cursor k rooms. When k shares a
    // factor with the room count every group keeps landing in the same subset
    // of rooms, so skip ahead until the round stride is coprime with it.
    fn stagger(&mut self, placed: usize) {
        let room_count = self.rooms.len();
        if room_count <= 1 || placed == 0 {
            return;
        }
        let extra = (0..room_count)
            .find(|extra| gcd(placed + extra, room_count) == 1)
            .unwrap_or(0);
        self.cursor = (self.cursor + extra) % room_count;
    }

    fn into_assignment(self) -> Assignment {
        Assignment { rooms: self.rooms }
    }
}
