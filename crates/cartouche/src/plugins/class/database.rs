//! Class diagram database
//!
//! Stores classes, their members and the relationships between them.

use std::fmt;

use tracing::trace;

use crate::core::{Database, ResettableState};

/// Visibility modifier for class members
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,    // +
    Private,   // -
    Protected, // #
    Package,   // ~
}

impl Visibility {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Visibility::Public),
            '-' => Some(Visibility::Private),
            '#' => Some(Visibility::Protected),
            '~' => Some(Visibility::Package),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Visibility::Public => '+',
            Visibility::Private => '-',
            Visibility::Protected => '#',
            Visibility::Package => '~',
        }
    }
}

/// A class member (attribute or method), kept as written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub visibility: Option<Visibility>,
    pub text: String,
}

impl Member {
    /// Methods are members whose text contains a parameter list
    pub fn is_method(&self) -> bool {
        self.text.contains('(')
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(visibility) = self.visibility {
            write!(f, "{}", visibility.to_char())?;
        }
        write!(f, "{}", self.text)
    }
}

/// A class in the diagram
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Class {
    pub name: String,
    pub members: Vec<Member>,
}

/// Relationship type between classes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationshipKind {
    Inheritance, // <|--
    Composition, // *--
    Aggregation, // o--
    Association, // -->
    Dependency,  // ..>
    Realization, // ..|>
    Link,        // --
    DashedLink,  // ..
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arrow = match self {
            RelationshipKind::Inheritance => "<|--",
            RelationshipKind::Composition => "*--",
            RelationshipKind::Aggregation => "o--",
            RelationshipKind::Association => "-->",
            RelationshipKind::Dependency => "..>",
            RelationshipKind::Realization => "..|>",
            RelationshipKind::Link => "--",
            RelationshipKind::DashedLink => "..",
        };
        f.write_str(arrow)
    }
}

/// A relationship between classes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    pub from: String,
    pub to: String,
    pub kind: RelationshipKind,
    pub label: Option<String>,
}

/// Everything a class diagram render reads
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassRecords {
    pub classes: Vec<Class>,
    pub relationships: Vec<Relationship>,
    pub arrow_marker_absolute: bool,
    /// Class whose `{ ... }` body is being parsed
    pub open_body: Option<String>,
}

/// Class diagram database
#[derive(Debug)]
pub struct ClassDatabase {
    state: ResettableState<ClassRecords>,
}

impl ClassDatabase {
    pub fn new() -> Self {
        Self {
            state: ResettableState::new(ClassRecords::default),
        }
    }

    /// Declare a class; declaring it again is a no-op
    pub fn add_class(&mut self, name: &str) {
        let classes = &mut self.state.records_mut().classes;
        if !classes.iter().any(|class| class.name == name) {
            trace!(class = name, "Adding class");
            classes.push(Class {
                name: name.to_string(),
                members: Vec::new(),
            });
        }
    }

    /// Append a member, declaring the class if needed
    pub fn add_member(&mut self, class: &str, member: Member) {
        self.add_class(class);
        if let Some(target) = self
            .state
            .records_mut()
            .classes
            .iter_mut()
            .find(|candidate| candidate.name == class)
        {
            target.members.push(member);
        }
    }

    /// Add a relationship, declaring both ends
    pub fn add_relationship(&mut self, relationship: Relationship) {
        self.add_class(&relationship.from);
        self.add_class(&relationship.to);
        self.state.records_mut().relationships.push(relationship);
    }

    pub fn get_class(&self, name: &str) -> Option<&Class> {
        self.classes().iter().find(|class| class.name == name)
    }

    pub fn classes(&self) -> &[Class] {
        &self.state.records().classes
    }

    pub fn relationships(&self) -> &[Relationship] {
        &self.state.records().relationships
    }

    pub fn open_body(&self) -> Option<&str> {
        self.state.records().open_body.as_deref()
    }

    pub fn set_open_body(&mut self, class: Option<String>) {
        self.state.records_mut().open_body = class;
    }

    pub fn arrow_marker_absolute(&self) -> bool {
        self.state.records().arrow_marker_absolute
    }

    pub fn set_arrow_marker_absolute(&mut self, absolute: bool) {
        self.state.records_mut().arrow_marker_absolute = absolute;
    }
}

impl Default for ClassDatabase {
    fn default() -> Self {
        Self::new()
    }
}

impl Database for ClassDatabase {
    type Records = ClassRecords;

    fn state(&self) -> &ResettableState<ClassRecords> {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ResettableState<ClassRecords> {
        &mut self.state
    }

    fn node_count(&self) -> usize {
        self.classes().len()
    }

    fn edge_count(&self) -> usize {
        self.relationships().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(visibility: Option<Visibility>, text: &str) -> Member {
        Member {
            visibility,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_relationship_declares_classes() {
        let mut db = ClassDatabase::new();
        db.add_relationship(Relationship {
            from: "Animal".to_string(),
            to: "Duck".to_string(),
            kind: RelationshipKind::Inheritance,
            label: None,
        });
        db.add_class("Animal");

        assert_eq!(db.node_count(), 2);
        assert_eq!(db.edge_count(), 1);
    }

    #[test]
    fn test_members_attach_to_class() {
        let mut db = ClassDatabase::new();
        db.add_member("Duck", member(Some(Visibility::Public), "swim()"));
        db.add_member("Duck", member(None, "int age"));

        let duck = db.get_class("Duck").unwrap();
        assert_eq!(duck.members.len(), 2);
        assert!(duck.members[0].is_method());
        assert_eq!(duck.members[0].to_string(), "+swim()");
        assert!(!duck.members[1].is_method());
    }

    #[test]
    fn test_clear_closes_open_body() {
        let mut db = ClassDatabase::new();
        db.add_class("Duck");
        db.set_open_body(Some("Duck".to_string()));

        db.clear().unwrap();

        assert_eq!(db.open_body(), None);
        assert!(db.classes().is_empty());
    }

    #[test]
    fn test_visibility_round_trip() {
        for c in ['+', '-', '#', '~'] {
            assert_eq!(Visibility::from_char(c).map(Visibility::to_char), Some(c));
        }
        assert_eq!(Visibility::from_char('x'), None);
    }
}
