use sqlx::FromRow;
use time::{Date, OffsetDateTime};

/// A student row. The identifier and group reference are assigned by the
/// persistence layer and are read-only to callers.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Student {
    id: Option<i64>,
    pub last_name: String,
    pub first_name: String,
    pub patronymic: String,
    pub birthday: OffsetDateTime,
    group_id: Option<i64>,
}

impl Student {
    pub fn new(
        last_name: impl Into<String>,
        first_name: impl Into<String>,
        patronymic: impl Into<String>,
        birthday: OffsetDateTime,
    ) -> Self {
        Self {
            id: None,
            last_name: last_name.into(),
            first_name: first_name.into(),
            patronymic: patronymic.into(),
            birthday,
            group_id: None,
        }
    }

    /// Rebuilds a student that was read back from storage.
    pub(crate) fn from_storage(
        id: i64,
        last_name: String,
        first_name: String,
        patronymic: String,
        birthday: OffsetDateTime,
        group_id: Option<i64>,
    ) -> Self {
        Self {
            id: Some(id),
            last_name,
            first_name,
            patronymic,
            birthday,
            group_id,
        }
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn group_id(&self) -> Option<i64> {
        self.group_id
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// "LastName FirstName Patronymic"
    pub fn full_name(&self) -> String {
        format!("{} {} {}", self.last_name, self.first_name, self.patronymic)
    }

    pub(crate) fn assign_id(&mut self, id: i64) {
        debug_assert!(self.id.is_none(), "student id is write-once");
        self.id = Some(id);
    }

    pub(crate) fn assign_group(&mut self, group_id: Option<i64>) {
        self.group_id = group_id;
    }
}

/// A study group and the students it owns.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    id: Option<i64>,
    pub name: String,
    students: Vec<Student>,
}

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            students: Vec::new(),
        }
    }

    pub(crate) fn from_storage(id: i64, name: String) -> Self {
        Self {
            id: Some(id),
            name,
            students: Vec::new(),
        }
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Attaches a student to this group. Saving the group through a
    /// [`UnitOfWork`](crate::unit_of_work::UnitOfWork) inserts the student too.
    pub fn add_student(&mut self, student: Student) {
        self.students.push(student);
    }

    /// Builder-style variant of [`Group::add_student`].
    pub fn with_student(mut self, student: Student) -> Self {
        self.add_student(student);
        self
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn student_count(&self) -> usize {
        self.students.len()
    }

    pub(crate) fn students_mut(&mut self) -> &mut Vec<Student> {
        &mut self.students
    }

    pub(crate) fn assign_id(&mut self, id: i64) {
        debug_assert!(self.id.is_none(), "group id is write-once");
        self.id = Some(id);
    }
}

/// Returns the same calendar moment `years` years before `now`.
///
/// February 29 maps to February 28 when the target year is not a leap year.
/// When the target year falls outside the range `time` can represent, `now`
/// is returned unchanged.
pub fn years_before(now: OffsetDateTime, years: i32) -> OffsetDateTime {
    let year = now.year() - years;
    let date = Date::from_calendar_date(year, now.month(), now.day())
        .or_else(|_| Date::from_calendar_date(year, now.month(), now.day() - 1));

    match date {
        Ok(date) => now.replace_date(date),
        Err(_) => now,
    }
}
