use std::io::{self, Write};

use crate::models::Group;

/// Writes the group name followed by one "LastName FirstName Patronymic"
/// line per student.
pub fn write_group_report(out: &mut impl Write, group: &Group) -> io::Result<()> {
    writeln!(out, "{}", group.name)?;
    for student in group.students() {
        writeln!(out, "{}", student.full_name())?;
    }
    Ok(())
}
