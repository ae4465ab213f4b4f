//! Group generation.

use rand::Rng;
use time::OffsetDateTime;

use students::models::Group;

use super::student::StudentGenerator;

/// Group name templates.
const GROUP_PREFIXES: &[&str] = &[
    "Mathematics", "Physics", "Chemistry", "Biology", "History", "Philology", "Economics", "Law",
    "Informatics", "Geology",
];

/// Generates groups with attached, unsaved students.
pub struct GroupGenerator {
    students: StudentGenerator,
}

impl GroupGenerator {
    pub fn new() -> Self {
        Self {
            students: StudentGenerator::new(),
        }
    }

    pub fn with_student_generator(students: StudentGenerator) -> Self {
        Self { students }
    }

    /// Generates a group name such as "Physics-103".
    pub fn generate_name(&self, index: usize, rng: &mut impl Rng) -> String {
        let prefix = GROUP_PREFIXES[rng.gen_range(0..GROUP_PREFIXES.len())];
        let year = rng.gen_range(1..=5);
        format!("{prefix}-{year}{:02}", index + 1)
    }

    /// Generates a group holding `size` new students.
    pub fn generate(
        &self,
        index: usize,
        size: usize,
        now: OffsetDateTime,
        rng: &mut impl Rng,
    ) -> Group {
        let mut group = Group::new(self.generate_name(index, rng));
        for student in self.students.generate_batch(size, now, rng) {
            group.add_student(student);
        }
        group
    }
}

impl Default for GroupGenerator {
    fn default() -> Self {
        Self::new()
    }
}
