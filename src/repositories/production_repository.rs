use chrono::NaiveDateTime;
use sea_orm::{
    sea_query::{Expr, Func, SimpleExpr},
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{page_index, BaseRepository, Repository};
use crate::db::query_builder::SearchBuilder;
use crate::entities::{
    defect_detail, production_detail,
    production_management::{self, ProductionStatusType},
};
use crate::errors::AppError;

/// How report list filters combine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFilterMode {
    /// Every supplied filter applies.
    #[default]
    Conjunctive,
    /// Only the first applicable filter applies, in the order status code,
    /// status type, date range, completion date, start date.
    FirstMatch,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportFilter {
    pub status_code: Option<i32>,
    pub status_type: Option<ProductionStatusType>,
    pub start_at: Option<NaiveDateTime>,
    pub completed_at: Option<NaiveDateTime>,
}

enum DateFilter {
    Between(NaiveDateTime, NaiveDateTime),
    CompletedAt(NaiveDateTime),
    StartAt(NaiveDateTime),
}

impl DateFilter {
    fn condition(&self) -> Condition {
        use production_management::Column;

        match *self {
            Self::Between(start, end) => Condition::all().add(Column::CompletedAt.between(start, end)),
            Self::CompletedAt(at) => Condition::all().add(Column::CompletedAt.eq(at)),
            Self::StartAt(at) => Condition::all().add(Column::StartAt.eq(at)),
        }
    }
}

impl ReportFilter {
    /// Status code filter; non-positive codes count as unset.
    fn status_code_condition(&self) -> Option<Condition> {
        use production_management::Column;

        self.status_code.filter(|code| *code > 0).map(|code| {
            Condition::all()
                .add(Column::ProductionStatusCode.eq(code))
                .add(Column::ProductionStatus.eq(ProductionStatusType::RegisterProduction))
        })
    }

    fn status_type_condition(&self) -> Option<Condition> {
        self.status_type.map(|status| {
            Condition::all().add(production_management::Column::ProductionStatus.eq(status))
        })
    }

    fn date_filter(&self) -> Option<DateFilter> {
        match (self.start_at, self.completed_at) {
            (Some(start), Some(end)) => Some(DateFilter::Between(start, end)),
            (None, Some(end)) => Some(DateFilter::CompletedAt(end)),
            (Some(start), None) => Some(DateFilter::StartAt(start)),
            (None, None) => None,
        }
    }

    pub fn condition(&self, mode: ReportFilterMode) -> Condition {
        let candidates = [
            self.status_code_condition(),
            self.status_type_condition(),
            self.date_filter().map(|filter| filter.condition()),
        ];

        match mode {
            ReportFilterMode::Conjunctive => candidates
                .into_iter()
                .flatten()
                .fold(SearchBuilder::new(), SearchBuilder::add)
                .build(),
            ReportFilterMode::FirstMatch => candidates
                .into_iter()
                .flatten()
                .next()
                .unwrap_or_else(Condition::all),
        }
    }

    pub fn select(&self, mode: ReportFilterMode) -> Select<production_management::Entity> {
        production_management::Entity::find()
            .filter(self.condition(mode))
            .order_by_desc(production_management::Column::ProductionStatusCode)
    }
}

#[derive(Debug, Clone)]
pub struct ProductionRepository {
    base: BaseRepository,
}

impl ProductionRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// One page of reports, newest identifier first. `page` is 1-based.
    pub async fn find_reports(
        &self,
        filter: &ReportFilter,
        mode: ReportFilterMode,
        page: u64,
        page_size: u64,
    ) -> Result<(Vec<production_management::Model>, u64), AppError> {
        let paginator = filter.select(mode).paginate(self.base.get_db(), page_size);

        let total = paginator.num_items().await?;
        let Some(index) = page_index(page, page_size, total) else {
            return Ok((Vec::new(), total));
        };
        let reports = paginator.fetch_page(index).await?;

        Ok((reports, total))
    }

    pub async fn find_report(
        &self,
        production_status_code: i32,
    ) -> Result<Option<production_management::Model>, AppError> {
        Ok(production_management::Entity::find_by_id(production_status_code)
            .one(self.base.get_db())
            .await?)
    }

    /// Details owned by `report`, in insertion order.
    pub async fn details_of(
        &self,
        report: &production_management::Model,
    ) -> Result<Vec<production_detail::Model>, AppError> {
        Ok(report
            .find_related(production_detail::Entity)
            .order_by_asc(production_detail::Column::ProductionDetailCode)
            .all(self.base.get_db())
            .await?)
    }

    pub async fn find_detail(
        &self,
        production_detail_code: i32,
    ) -> Result<Option<production_detail::Model>, AppError> {
        Ok(production_detail::Entity::find_by_id(production_detail_code)
            .one(self.base.get_db())
            .await?)
    }

    /// Defects owned by `detail`, in insertion order.
    pub async fn defects_of(
        &self,
        detail: &production_detail::Model,
    ) -> Result<Vec<defect_detail::Model>, AppError> {
        Ok(detail
            .find_related(defect_detail::Entity)
            .order_by_asc(defect_detail::Column::DefectCode)
            .all(self.base.get_db())
            .await?)
    }

    /// Sum of defect and completed quantities over every detail line.
    pub async fn total_production_quantity(&self) -> Result<i64, AppError> {
        let total = production_detail::Entity::find()
            .select_only()
            .column_as(
                SimpleExpr::from(Func::sum(
                    Expr::col(production_detail::Column::DefectQuantity)
                        .add(Expr::col(production_detail::Column::CompletelyQuantity)),
                )),
                "total",
            )
            .into_tuple::<Option<i64>>()
            .one(self.base.get_db())
            .await?;

        Ok(total.flatten().unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use sea_orm::{DbBackend, QueryTrait};

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn sql(filter: &ReportFilter, mode: ReportFilterMode) -> String {
        filter.select(mode).build(DbBackend::Sqlite).to_string()
    }

    #[test]
    fn no_filters_selects_everything_newest_first() {
        let sql = sql(&ReportFilter::default(), ReportFilterMode::Conjunctive);
        assert!(!sql.contains("WHERE"));
        assert!(sql.ends_with(
            r#"ORDER BY "production_managements"."production_status_code" DESC"#
        ));
    }

    #[test]
    fn status_code_pins_register_production() {
        let filter = ReportFilter {
            status_code: Some(7),
            ..Default::default()
        };
        let sql = sql(&filter, ReportFilterMode::Conjunctive);
        assert!(sql.contains(r#""production_managements"."production_status_code" = 7"#));
        assert!(sql.contains("'REGISTER_PRODUCTION'"));
    }

    #[test]
    fn non_positive_status_code_is_ignored() {
        let filter = ReportFilter {
            status_code: Some(0),
            ..Default::default()
        };
        assert!(!sql(&filter, ReportFilterMode::FirstMatch).contains("WHERE"));
        assert!(!sql(&filter, ReportFilterMode::Conjunctive).contains("WHERE"));
    }

    #[test]
    fn conjunctive_mode_combines_every_filter() {
        let filter = ReportFilter {
            status_code: Some(3),
            status_type: Some(ProductionStatusType::ProductionCompleted),
            start_at: Some(at(1, 8)),
            completed_at: Some(at(2, 18)),
        };
        let sql = sql(&filter, ReportFilterMode::Conjunctive);
        assert!(sql.contains(r#""production_status_code" = 3"#));
        assert!(sql.contains("'PRODUCTION_COMPLETED'"));
        assert!(sql.contains(r#""production_managements"."completed_at" BETWEEN"#));
    }

    #[test]
    fn first_match_mode_applies_only_the_leading_filter() {
        let filter = ReportFilter {
            status_code: None,
            status_type: Some(ProductionStatusType::ProductionOnHold),
            start_at: Some(at(1, 8)),
            completed_at: Some(at(2, 18)),
        };
        let sql = sql(&filter, ReportFilterMode::FirstMatch);
        assert!(sql.contains("'PRODUCTION_ON_HOLD'"));
        assert!(!sql.contains("BETWEEN"));
    }

    #[test]
    fn single_dates_compare_their_own_column() {
        let completed_only = ReportFilter {
            completed_at: Some(at(2, 18)),
            ..Default::default()
        };
        let sql_completed = sql(&completed_only, ReportFilterMode::Conjunctive);
        assert!(sql_completed.contains(r#""production_managements"."completed_at" = "#));

        let start_only = ReportFilter {
            start_at: Some(at(1, 8)),
            ..Default::default()
        };
        let sql_start = sql(&start_only, ReportFilterMode::FirstMatch);
        assert!(sql_start.contains(r#""production_managements"."start_at" = "#));
    }
}
