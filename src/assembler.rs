//! Document assembly
//!
//! The parser hands over a flat entry list; this stage folds it into one
//! table tree while enforcing TOML's redefinition rules. Tables live in
//! an arena and are referred to by id, so "this exact table was defined
//! directly" and "this exact array was made by `[[…]]` headers" are id
//! sets rather than anything structural: two tables can be equal in
//! content and still have different histories.
//!
//! Assembly stops at the first conflict. Every entry the parser accepted
//! is syntactically fine; a conflict here means the document contradicts
//! itself, and everything after the contradiction would be guesswork.

use std::collections::HashSet;

use crate::error::{AssemblyError, AssemblyErrorKind};
use crate::lexer::Position;
use crate::parser::ast::{Key, KeyValue, TomlArray, TomlValue, TopLevelEntry};
use crate::value::{AtomicNode, Node, PlainValue};

/// How arrays mixing element kinds are treated. The four date/time kinds
/// count as distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArrayPolicy {
    /// Mixed-kind arrays are a conflict
    #[default]
    Strict,
    /// Mixed-kind arrays are allowed
    Lenient,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct TableId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct ArrayId(usize);

#[derive(Debug, Clone)]
enum Slot {
    Table(TableId),
    Array(ArrayId),
    Atomic(AtomicNode),
}

/// A cheap view of what occupies a slot
#[derive(Debug, Clone, Copy)]
enum SlotKind {
    Table(TableId),
    Array(ArrayId),
    Atomic,
}

/// The assembled document: an arena of tables and arrays rooted at the
/// top level table.
#[derive(Debug)]
pub struct RootTable {
    tables: Vec<Vec<(String, Slot)>>,
    arrays: Vec<Vec<Slot>>,
    root: TableId,
}

impl RootTable {
    /// The full fidelity tree
    pub fn to_node(&self) -> Node {
        self.table_node(self.root)
    }

    /// The plain native-value tree
    pub fn to_plain(&self) -> PlainValue {
        self.to_node().to_plain()
    }

    fn table_node(&self, id: TableId) -> Node {
        Node::Table(
            self.tables[id.0]
                .iter()
                .map(|(key, slot)| (key.clone(), self.slot_node(slot)))
                .collect(),
        )
    }

    fn slot_node(&self, slot: &Slot) -> Node {
        match slot {
            Slot::Table(id) => self.table_node(*id),
            Slot::Array(id) => {
                Node::Array(self.arrays[id.0].iter().map(|s| self.slot_node(s)).collect())
            }
            Slot::Atomic(atomic) => Node::Atomic(atomic.clone()),
        }
    }
}

/// Folds parsed entries into a document tree, stopping at the first
/// structural conflict.
pub fn assemble(
    entries: &[TopLevelEntry],
    policy: ArrayPolicy,
) -> Result<RootTable, AssemblyError> {
    let mut asm = Assembler {
        tables: Vec::new(),
        arrays: Vec::new(),
        direct_tables: HashSet::new(),
        header_arrays: HashSet::new(),
        policy,
    };
    let root = asm.new_table();
    let mut current = root;

    for entry in entries {
        match entry {
            TopLevelEntry::KeyValue(kv) => asm.process_key_value(kv, current)?,
            TopLevelEntry::TableHeader { keys, .. } => {
                current = asm.init_table(root, keys, false, true)?;
            }
            TopLevelEntry::TableArrayHeader { keys, .. } => {
                current = asm.init_table(root, keys, true, true)?;
            }
        }
    }

    Ok(RootTable { tables: asm.tables, arrays: asm.arrays, root })
}

struct Assembler {
    tables: Vec<Vec<(String, Slot)>>,
    arrays: Vec<Vec<Slot>>,
    /// Tables created by a `[header]`, an inline table binding, or a
    /// `[[header]]` element; extending one from a header is a conflict
    direct_tables: HashSet<TableId>,
    /// Arrays created by `[[header]]`s, as opposed to array values
    header_arrays: HashSet<ArrayId>,
    policy: ArrayPolicy,
}

impl Assembler {
    fn new_table(&mut self) -> TableId {
        self.tables.push(Vec::new());
        TableId(self.tables.len() - 1)
    }

    fn new_array(&mut self, items: Vec<Slot>) -> ArrayId {
        self.arrays.push(items);
        ArrayId(self.arrays.len() - 1)
    }

    fn slot_kind(&self, table: TableId, key: &str) -> Option<SlotKind> {
        self.tables[table.0]
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, slot)| match slot {
                Slot::Table(id) => SlotKind::Table(*id),
                Slot::Array(id) => SlotKind::Array(*id),
                Slot::Atomic(_) => SlotKind::Atomic,
            })
    }

    fn insert(&mut self, table: TableId, key: &str, slot: Slot) {
        self.tables[table.0].push((key.to_string(), slot));
    }

    /// A slot a key path may pass through: a table, or an array whose
    /// elements are tables (a path descends into its last element).
    fn traversable(&self, kind: SlotKind) -> bool {
        match kind {
            SlotKind::Table(_) => true,
            SlotKind::Array(id) => self.is_table_array(id),
            SlotKind::Atomic => false,
        }
    }

    fn is_table_array(&self, id: ArrayId) -> bool {
        matches!(self.arrays[id.0].first(), Some(Slot::Table(_)))
    }

    fn conflict(
        &self,
        kind: AssemblyErrorKind,
        pos: Position,
        image: &str,
    ) -> AssemblyError {
        AssemblyError { kind, pos, image: image.to_string() }
    }

    /// Walks (and creates) the table hierarchy named by `names` under
    /// `parent`, returning the table the path ends at. `is_array` is set
    /// for `[[…]]` headers, `directly_initialized` for headers as opposed
    /// to the implicit parents of dotted keys.
    fn init_table(
        &mut self,
        parent: TableId,
        names: &[Key],
        is_array: bool,
        directly_initialized: bool,
    ) -> Result<TableId, AssemblyError> {
        let key = &names[0];
        let existing = self.slot_kind(parent, &key.name);
        if let Some(kind) = existing {
            if !self.traversable(kind) {
                return Err(self.conflict(
                    AssemblyErrorKind::PathAlreadyValue,
                    key.pos,
                    &key.name,
                ));
            }
        }

        if names.len() == 1 {
            return match existing {
                Some(SlotKind::Table(id)) => {
                    if self.direct_tables.contains(&id) {
                        return Err(self.conflict(
                            AssemblyErrorKind::DirectRedefinition,
                            key.pos,
                            &key.name,
                        ));
                    }
                    if is_array {
                        return Err(self.conflict(
                            AssemblyErrorKind::PathAlreadyTable,
                            key.pos,
                            &key.name,
                        ));
                    }
                    if directly_initialized {
                        self.direct_tables.insert(id);
                    }
                    Ok(id)
                }
                Some(SlotKind::Array(id)) => {
                    if !is_array {
                        return Err(self.conflict(
                            AssemblyErrorKind::PathAlreadyTableArray,
                            key.pos,
                            &key.name,
                        ));
                    }
                    if !self.header_arrays.contains(&id) {
                        return Err(self.conflict(
                            AssemblyErrorKind::StaticTableArrayConflict,
                            key.pos,
                            &key.name,
                        ));
                    }
                    let table = self.new_table();
                    self.arrays[id.0].push(Slot::Table(table));
                    self.direct_tables.insert(table);
                    Ok(table)
                }
                None => {
                    let table = self.new_table();
                    if is_array {
                        let array = self.new_array(vec![Slot::Table(table)]);
                        self.header_arrays.insert(array);
                        self.insert(parent, &key.name, Slot::Array(array));
                    } else {
                        self.insert(parent, &key.name, Slot::Table(table));
                    }
                    if directly_initialized {
                        self.direct_tables.insert(table);
                    }
                    Ok(table)
                }
                Some(SlotKind::Atomic) => Err(self.conflict(
                    AssemblyErrorKind::PathAlreadyValue,
                    key.pos,
                    &key.name,
                )),
            };
        }

        let next = match existing {
            Some(SlotKind::Table(id)) => id,
            Some(SlotKind::Array(id)) => match self.arrays[id.0].last() {
                Some(Slot::Table(table)) => *table,
                _ => {
                    return Err(self.conflict(
                        AssemblyErrorKind::PathAlreadyValue,
                        key.pos,
                        &key.name,
                    ))
                }
            },
            None => {
                // implicit parent of a deeper path, never marked direct
                let table = self.new_table();
                self.insert(parent, &key.name, Slot::Table(table));
                table
            }
            Some(SlotKind::Atomic) => {
                return Err(self.conflict(
                    AssemblyErrorKind::PathAlreadyValue,
                    key.pos,
                    &key.name,
                ))
            }
        };
        self.init_table(next, &names[1..], is_array, directly_initialized)
    }

    /// Binds one `key.path = value` under `current`
    fn process_key_value(
        &mut self,
        kv: &KeyValue,
        current: TableId,
    ) -> Result<(), AssemblyError> {
        let slot = self.convert(&kv.value)?;
        let (parents, last) = kv.keys.split_at(kv.keys.len() - 1);
        let last = &last[0];
        let target = if parents.is_empty() {
            current
        } else {
            self.init_table(current, parents, false, false)?
        };

        if let Some(existing) = self.slot_kind(target, &last.name) {
            let kind = match existing {
                SlotKind::Table(_) => AssemblyErrorKind::PathAlreadyTable,
                SlotKind::Array(id) if self.header_arrays.contains(&id) => {
                    AssemblyErrorKind::PathAlreadyTableArray
                }
                _ => AssemblyErrorKind::PathAlreadyValue,
            };
            return Err(self.conflict(kind, last.pos, &last.name));
        }

        if let Slot::Table(id) = slot {
            self.direct_tables.insert(id);
        }
        self.insert(target, &last.name, slot);
        Ok(())
    }

    /// Lowers a syntactic value into a slot, materializing inline tables
    /// and arrays into the arena.
    fn convert(&mut self, value: &TomlValue) -> Result<Slot, AssemblyError> {
        let atomic = |kind, image: &str, plain| {
            Ok(Slot::Atomic(AtomicNode { kind, image: image.to_string(), value: plain }))
        };
        match value {
            TomlValue::String(a) => {
                atomic(value.kind(), &a.image, PlainValue::String(a.value.clone()))
            }
            TomlValue::Integer(a) => atomic(value.kind(), &a.image, PlainValue::Integer(a.value)),
            TomlValue::Float(a) => atomic(value.kind(), &a.image, PlainValue::Float(a.value)),
            TomlValue::Boolean(a) => atomic(value.kind(), &a.image, PlainValue::Boolean(a.value)),
            TomlValue::OffsetDateTime(a)
            | TomlValue::LocalDateTime(a)
            | TomlValue::LocalDate(a)
            | TomlValue::LocalTime(a) => {
                atomic(value.kind(), &a.image, PlainValue::DateTime(a.value))
            }
            TomlValue::Array(array) => {
                if self.policy == ArrayPolicy::Strict {
                    self.check_homogeneous(array)?;
                }
                let mut items = Vec::with_capacity(array.values.len());
                for item in &array.values {
                    items.push(self.convert(item)?);
                }
                let id = self.new_array(items);
                Ok(Slot::Array(id))
            }
            TomlValue::InlineTable(table) => {
                let id = self.new_table();
                for binding in &table.bindings {
                    self.process_key_value(binding, id)?;
                }
                Ok(Slot::Table(id))
            }
        }
    }

    fn check_homogeneous(&self, array: &TomlArray) -> Result<(), AssemblyError> {
        let mut kinds = array.values.iter().map(TomlValue::kind);
        let Some(first) = kinds.next() else { return Ok(()) };
        for kind in kinds {
            if kind != first {
                return Err(self.conflict(
                    AssemblyErrorKind::ArrayTypeMismatch,
                    array.pos,
                    &format!("{first} and {kind}"),
                ));
            }
        }
        Ok(())
    }
}
