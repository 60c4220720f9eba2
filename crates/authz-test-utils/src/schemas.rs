//! Schema source fixtures.

/// Two types, one relation, one permission.
pub const SCENARIO: &str = "\
definition user {}

definition org {
    relation admin: user
    permission administrate = admin
}
";

/// A realistic multi-type schema with unions, arrows and comments.
pub const ORGANIZATION: &str = "\
// Authorization schema for the back office.

/** user represents a person signing in */
definition user {
    relation self: user
    permission read = self
    permission update = self
}

definition group {
    relation organization: organization
    relation member: user | group#member

    permission edit_members = organization->administrate
}

definition organization {
    relation admin: user
    relation member: user | group#member

    permission administrate = admin
    permission read = admin + member
}

definition table_view {
    relation organization: organization
    relation creator: user

    permission view = creator + organization->read
    permission edit = creator + (organization->administrate - creator)
}
";

/// `org` is declared twice.
pub const DUPLICATE_TYPE: &str = "\
definition user {}
definition org {}
definition org {}
";

/// `doc` references a type that is never declared.
pub const UNKNOWN_TYPE: &str = "\
definition user {}

definition doc {
    relation owner: team
}
";
