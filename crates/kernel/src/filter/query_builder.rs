//! WHERE clause construction for livestock and crops filters.
//!
//! A filter is first lowered into a [`WhereClause`]: the mandatory range plus
//! an ordered list of optional clauses. That single intermediate form is
//! rendered two ways:
//! - [`WhereClause::to_fragment`]: the literal `WHERE ...` text, kept for
//!   compatibility and logged with every filtered query.
//! - [`WhereClause::to_condition`]: a SeaQuery condition whose values become
//!   bind parameters when the statement is built.
//!
//! Both renderings walk the same list, so clause inclusion and order agree.

use std::fmt::Write;

use sea_query::{Cond, Condition, Expr, ExprTrait, Iden, Query, SimpleExpr};

use super::types::{CropsFilter, LivestockFilter, RangeFilter};

/// Tables a filter can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Iden)]
pub enum FilterTable {
    Livestock,
    Crops,
    Nurture,
}

/// Columns referenced by filter clauses.
///
/// [`FilterColumn::name`] is the spelling used in the literal fragment. The
/// schema declares these columns unquoted, so Postgres stores them folded to
/// lower case, and that folded form is what SeaQuery quotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Iden)]
pub enum FilterColumn {
    Age,
    #[iden = "tagid"]
    TagId,
    Harvestable,
    #[iden = "animaltype"]
    AnimalType,
    Diet,
    Quantity,
    #[iden = "croptype"]
    CropType,
    #[iden = "cropvariant"]
    CropVariant,
    #[iden = "cropstatus"]
    CropStatus,
    #[iden = "waterspent"]
    WaterSpent,
    #[iden = "foodspent"]
    FoodSpent,
}

impl FilterColumn {
    pub fn name(self) -> &'static str {
        match self {
            FilterColumn::Age => "age",
            FilterColumn::TagId => "tagID",
            FilterColumn::Harvestable => "harvestable",
            FilterColumn::AnimalType => "animalType",
            FilterColumn::Diet => "diet",
            FilterColumn::Quantity => "quantity",
            FilterColumn::CropType => "cropType",
            FilterColumn::CropVariant => "cropVariant",
            FilterColumn::CropStatus => "cropStatus",
            FilterColumn::WaterSpent => "waterSpent",
            FilterColumn::FoodSpent => "foodSpent",
        }
    }
}

/// One optional clause, rendered as `AND (...)` in the fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause {
    /// `column = 1` or `column = 0`.
    Flag { column: FilterColumn, value: bool },
    /// `column = 'text'`.
    Equals {
        column: FilterColumn,
        value: &'static str,
    },
    /// `column >= min AND column <= max`.
    Range {
        column: FilterColumn,
        range: RangeFilter,
    },
    /// Animals whose nurture records sum `resource` to at least `min`.
    SpentAtLeast { resource: FilterColumn, min: i64 },
}

impl Clause {
    fn write_fragment(&self, out: &mut String) {
        let _ = match self {
            Clause::Flag { column, value } => {
                write!(out, "{} = {}", column.name(), u8::from(*value))
            }
            Clause::Equals { column, value } => write!(out, "{} = '{}'", column.name(), value),
            Clause::Range { column, range } => write!(
                out,
                "{col} >= {} AND {col} <= {}",
                range.min,
                range.max,
                col = column.name()
            ),
            Clause::SpentAtLeast { resource, min } => write!(
                out,
                "{tag} IN (SELECT {tag} FROM nurture GROUP BY {tag} HAVING SUM({}) >= {min})",
                resource.name(),
                tag = FilterColumn::TagId.name()
            ),
        };
    }

    fn to_expr(&self) -> SimpleExpr {
        match self {
            Clause::Flag { column, value } => Expr::col(*column).eq(i32::from(*value)),
            Clause::Equals { column, value } => Expr::col(*column).eq(*value),
            Clause::Range { column, range } => Expr::col(*column)
                .gte(range.min)
                .and(Expr::col(*column).lte(range.max)),
            Clause::SpentAtLeast { resource, min } => {
                let totals = Query::select()
                    .column(FilterColumn::TagId)
                    .from(FilterTable::Nurture)
                    .group_by_col(FilterColumn::TagId)
                    .and_having(Expr::col(*resource).sum().gte(*min))
                    .to_owned();
                Expr::col(FilterColumn::TagId).in_subquery(totals)
            }
        }
    }
}

/// A lowered filter: the mandatory range followed by optional clauses in
/// their fixed order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhereClause {
    table: FilterTable,
    column: FilterColumn,
    range: RangeFilter,
    clauses: Vec<Clause>,
}

impl WhereClause {
    fn new(table: FilterTable, column: FilterColumn, range: RangeFilter) -> Self {
        Self {
            table,
            column,
            range,
            clauses: Vec::new(),
        }
    }

    fn push(&mut self, clause: Clause) {
        self.clauses.push(clause);
    }

    /// Table the clause applies to.
    pub fn table(&self) -> FilterTable {
        self.table
    }

    /// Optional clauses in emission order.
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Render the literal fragment, e.g.
    /// `WHERE age >= 0 AND age <= 10 AND (harvestable = 1)`.
    pub fn to_fragment(&self) -> String {
        let mut out = String::from("WHERE ");
        Clause::Range {
            column: self.column,
            range: self.range,
        }
        .write_fragment(&mut out);

        for clause in &self.clauses {
            out.push_str(" AND (");
            clause.write_fragment(&mut out);
            out.push(')');
        }
        out
    }

    /// Render as a SeaQuery condition. Values are bound, never inlined, when
    /// the enclosing statement is built with `build(PostgresQueryBuilder)`.
    pub fn to_condition(&self) -> Condition {
        let mut cond = Cond::all()
            .add(Expr::col(self.column).gte(self.range.min))
            .add(Expr::col(self.column).lte(self.range.max));
        for clause in &self.clauses {
            cond = cond.add(clause.to_expr());
        }
        cond
    }
}

/// Conversion of a filter into its WHERE clause.
pub trait FilterCriteria {
    fn where_clause(&self) -> WhereClause;

    /// Literal `WHERE ...` fragment for this filter.
    fn query_fragment(&self) -> String {
        self.where_clause().to_fragment()
    }
}

impl FilterCriteria for LivestockFilter {
    fn where_clause(&self) -> WhereClause {
        let mut clause = WhereClause::new(FilterTable::Livestock, FilterColumn::Age, self.age());

        if let Some(value) = self.harvestable().as_bool() {
            clause.push(Clause::Flag {
                column: FilterColumn::Harvestable,
                value,
            });
        }
        if let Some(animal_type) = self.animal_type() {
            clause.push(Clause::Equals {
                column: FilterColumn::AnimalType,
                value: animal_type.as_str(),
            });
        }
        if let Some(diet) = self.diet() {
            clause.push(Clause::Equals {
                column: FilterColumn::Diet,
                value: diet.as_str(),
            });
        }
        if let Some(range) = self.tag_id() {
            clause.push(Clause::Range {
                column: FilterColumn::TagId,
                range,
            });
        }
        if let Some(min) = self.min_water_spent() {
            clause.push(Clause::SpentAtLeast {
                resource: FilterColumn::WaterSpent,
                min,
            });
        }
        if let Some(min) = self.min_food_spent() {
            clause.push(Clause::SpentAtLeast {
                resource: FilterColumn::FoodSpent,
                min,
            });
        }

        clause
    }
}

impl FilterCriteria for CropsFilter {
    fn where_clause(&self) -> WhereClause {
        let mut clause =
            WhereClause::new(FilterTable::Crops, FilterColumn::Quantity, self.quantity());

        if let Some(crop_type) = self.crop_type() {
            clause.push(Clause::Equals {
                column: FilterColumn::CropType,
                value: crop_type.as_str(),
            });
        }
        if let Some(variant) = self.crop_variant() {
            clause.push(Clause::Equals {
                column: FilterColumn::CropVariant,
                value: variant.as_str(),
            });
        }
        if let Some(status) = self.crop_status() {
            clause.push(Clause::Equals {
                column: FilterColumn::CropStatus,
                value: status.as_str(),
            });
        }

        clause
    }
}
