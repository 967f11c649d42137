//! Relational expressions
//!
//! [`RelNode`] is the object-safe view the metadata framework has of a node in an
//! algebra tree. The node-kind set is open: every kind is a Rust type declared in a
//! [`TypeHierarchy`] under `dyn RelNode`, so plug-ins add kinds by implementing the
//! trait and declaring the type, without touching this crate.

use crate::collation::RelCollation;
use crate::error::CollationResult;
use crate::metadata::util::guess_selectivity;
use crate::rex::RexNode;
use sqlmeta_dispatch::{DispatchResult, TypeHierarchy};
use sqlmeta_types::{RelDataType, SqlTypeName};
use std::any::{Any, TypeId};
use std::fmt;
use std::slice;
use std::sync::Arc;

/// A node in a relational algebra tree
pub trait RelNode: Any + Send + Sync + fmt::Debug {
    /// Upcast used to recover the concrete kind
    fn as_any(&self) -> &dyn Any;

    fn kind_name(&self) -> &'static str;

    fn inputs(&self) -> &[RelNodeRef];

    fn row_type(&self) -> &RelDataType;

    /// The node's own row-count estimate, used when no provider knows better
    fn estimate_row_count(&self) -> f64 {
        1.0
    }

    /// Sort orders the node's output is known to satisfy
    fn collations(&self) -> Vec<RelCollation> {
        Vec::new()
    }
}

/// Shared handle to a relational expression
pub type RelNodeRef = Arc<dyn RelNode>;

/// Declare `dyn RelNode` and the standard node kinds in `hierarchy`.
///
/// Safe to call repeatedly.
pub fn register_standard_kinds(hierarchy: &TypeHierarchy) -> DispatchResult<()> {
    let root = TypeId::of::<dyn RelNode>();
    hierarchy.declare::<dyn RelNode>("RelNode", &[])?;
    hierarchy.declare::<TableScan>("TableScan", &[root])?;
    hierarchy.declare::<Filter>("Filter", &[root])?;
    hierarchy.declare::<Project>("Project", &[root])?;
    hierarchy.declare::<Sort>("Sort", &[root])?;
    hierarchy.declare::<Union>("Union", &[root])?;
    hierarchy.declare::<Join>("Join", &[root])?;
    hierarchy.declare::<SemiJoin>("SemiJoin", &[TypeId::of::<Join>()])?;
    Ok(())
}

fn concat_row_types(left: &RelDataType, right: &RelDataType) -> RelDataType {
    let fields = left
        .fields()
        .iter()
        .chain(right.fields())
        .map(|field| (field.name.clone(), field.field_type.clone()))
        .collect();
    RelDataType::new(SqlTypeName::Row).with_fields(fields)
}

// === Leaves ===

/// Scan of a stored table with a known cardinality
#[derive(Debug, Clone)]
pub struct TableScan {
    table: String,
    row_type: RelDataType,
    row_count: f64,
}

impl TableScan {
    pub fn new(table: impl Into<String>, row_type: RelDataType, row_count: f64) -> Self {
        Self {
            table: table.into(),
            row_type,
            row_count,
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }
}

impl RelNode for TableScan {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn kind_name(&self) -> &'static str {
        "TableScan"
    }

    fn inputs(&self) -> &[RelNodeRef] {
        &[]
    }

    fn row_type(&self) -> &RelDataType {
        &self.row_type
    }

    fn estimate_row_count(&self) -> f64 {
        self.row_count
    }
}

// === Single-input nodes ===

/// Rows of the input satisfying a condition
#[derive(Debug, Clone)]
pub struct Filter {
    input: [RelNodeRef; 1],
    condition: RexNode,
}

impl Filter {
    pub fn new(input: RelNodeRef, condition: RexNode) -> Self {
        Self {
            input: [input],
            condition,
        }
    }

    pub fn input(&self) -> &dyn RelNode {
        self.input[0].as_ref()
    }

    pub fn condition(&self) -> &RexNode {
        &self.condition
    }
}

impl RelNode for Filter {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn kind_name(&self) -> &'static str {
        "Filter"
    }

    fn inputs(&self) -> &[RelNodeRef] {
        &self.input
    }

    fn row_type(&self) -> &RelDataType {
        self.input().row_type()
    }

    fn estimate_row_count(&self) -> f64 {
        self.input().estimate_row_count() * guess_selectivity(Some(&self.condition))
    }

    fn collations(&self) -> Vec<RelCollation> {
        self.input().collations()
    }
}

/// Computes one expression per output field
#[derive(Debug, Clone)]
pub struct Project {
    input: [RelNodeRef; 1],
    exprs: Vec<RexNode>,
    row_type: RelDataType,
}

impl Project {
    pub fn new(input: RelNodeRef, exprs: Vec<RexNode>, row_type: RelDataType) -> Self {
        Self {
            input: [input],
            exprs,
            row_type,
        }
    }

    pub fn input(&self) -> &dyn RelNode {
        self.input[0].as_ref()
    }

    pub fn exprs(&self) -> &[RexNode] {
        &self.exprs
    }
}

impl RelNode for Project {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn kind_name(&self) -> &'static str {
        "Project"
    }

    fn inputs(&self) -> &[RelNodeRef] {
        &self.input
    }

    fn row_type(&self) -> &RelDataType {
        &self.row_type
    }

    fn estimate_row_count(&self) -> f64 {
        self.input().estimate_row_count()
    }
}

/// Orders the input by a collation
#[derive(Debug, Clone)]
pub struct Sort {
    input: [RelNodeRef; 1],
    collation: RelCollation,
}

impl Sort {
    /// Fails when the collation names a field the input does not have
    pub fn new(input: RelNodeRef, collation: RelCollation) -> CollationResult<Self> {
        RelCollation::is_valid(input.row_type(), slice::from_ref(&collation), true)?;
        Ok(Self {
            input: [input],
            collation,
        })
    }

    pub fn input(&self) -> &dyn RelNode {
        self.input[0].as_ref()
    }

    pub fn collation(&self) -> &RelCollation {
        &self.collation
    }
}

impl RelNode for Sort {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn kind_name(&self) -> &'static str {
        "Sort"
    }

    fn inputs(&self) -> &[RelNodeRef] {
        &self.input
    }

    fn row_type(&self) -> &RelDataType {
        self.input().row_type()
    }

    fn estimate_row_count(&self) -> f64 {
        self.input().estimate_row_count()
    }

    fn collations(&self) -> Vec<RelCollation> {
        vec![self.collation.clone()]
    }
}

// === Multi-input nodes ===

/// Set union of its inputs
#[derive(Debug, Clone)]
pub struct Union {
    inputs: Vec<RelNodeRef>,
    all: bool,
    row_type: RelDataType,
}

impl Union {
    pub fn new(inputs: Vec<RelNodeRef>, all: bool) -> Self {
        let row_type = inputs
            .first()
            .map(|input| input.row_type().clone())
            .unwrap_or_else(|| RelDataType::new(SqlTypeName::Row));
        Self {
            inputs,
            all,
            row_type,
        }
    }

    /// Whether duplicates are kept
    pub fn all(&self) -> bool {
        self.all
    }
}

impl RelNode for Union {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn kind_name(&self) -> &'static str {
        "Union"
    }

    fn inputs(&self) -> &[RelNodeRef] {
        &self.inputs
    }

    fn row_type(&self) -> &RelDataType {
        &self.row_type
    }

    fn estimate_row_count(&self) -> f64 {
        self.inputs.iter().map(|input| input.estimate_row_count()).sum()
    }
}

/// Inner join of two inputs
#[derive(Debug, Clone)]
pub struct Join {
    inputs: [RelNodeRef; 2],
    condition: RexNode,
    row_type: RelDataType,
}

impl Join {
    pub fn new(left: RelNodeRef, right: RelNodeRef, condition: RexNode) -> Self {
        let row_type = concat_row_types(left.row_type(), right.row_type());
        Self {
            inputs: [left, right],
            condition,
            row_type,
        }
    }

    pub fn left(&self) -> &dyn RelNode {
        self.inputs[0].as_ref()
    }

    pub fn right(&self) -> &dyn RelNode {
        self.inputs[1].as_ref()
    }

    pub fn condition(&self) -> &RexNode {
        &self.condition
    }
}

impl RelNode for Join {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn kind_name(&self) -> &'static str {
        "Join"
    }

    fn inputs(&self) -> &[RelNodeRef] {
        &self.inputs
    }

    fn row_type(&self) -> &RelDataType {
        &self.row_type
    }

    fn estimate_row_count(&self) -> f64 {
        self.left().estimate_row_count()
            * self.right().estimate_row_count()
            * guess_selectivity(Some(&self.condition))
    }
}

/// Rows of the left input with at least one match in the right input.
///
/// Declared as a kind of [`Join`]. Matching is an equi-join on the key pairs.
#[derive(Debug, Clone)]
pub struct SemiJoin {
    inputs: [RelNodeRef; 2],
    condition: RexNode,
    left_keys: Vec<usize>,
    right_keys: Vec<usize>,
}

impl SemiJoin {
    pub fn new(
        left: RelNodeRef,
        right: RelNodeRef,
        condition: RexNode,
        left_keys: Vec<usize>,
        right_keys: Vec<usize>,
    ) -> Self {
        Self {
            inputs: [left, right],
            condition,
            left_keys,
            right_keys,
        }
    }

    pub fn left(&self) -> &dyn RelNode {
        self.inputs[0].as_ref()
    }

    pub fn right(&self) -> &dyn RelNode {
        self.inputs[1].as_ref()
    }

    pub fn condition(&self) -> &RexNode {
        &self.condition
    }

    pub fn left_keys(&self) -> &[usize] {
        &self.left_keys
    }

    pub fn right_keys(&self) -> &[usize] {
        &self.right_keys
    }
}

impl RelNode for SemiJoin {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn kind_name(&self) -> &'static str {
        "SemiJoin"
    }

    fn inputs(&self) -> &[RelNodeRef] {
        &self.inputs
    }

    fn row_type(&self) -> &RelDataType {
        self.left().row_type()
    }

    fn estimate_row_count(&self) -> f64 {
        self.left().estimate_row_count() * guess_selectivity(Some(&self.condition))
    }
}
