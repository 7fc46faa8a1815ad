use metrics::{counter, histogram};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseConnection, EntityTrait};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::{
    db::with_transaction,
    dto::production::{
        DefectDetailCreateRequest, DefectDetailResponse, ProductionDetailResponse,
        ProductionReportResponse, ReportCreateRequest,
    },
    entities::{defect_detail, production_detail, production_management, work_order},
    errors::{ErrorCode, ServiceError},
    repositories::{ProductionRepository, ReportFilter, ReportFilterMode},
    services::Page,
};

/// Production reports: paged listing, drill-down into details and defects,
/// and the all-or-nothing report registration.
#[derive(Clone)]
pub struct ProductionService {
    db: Arc<DatabaseConnection>,
    repository: ProductionRepository,
    filter_mode: ReportFilterMode,
    page_size: u64,
}

impl ProductionService {
    pub fn new(db: Arc<DatabaseConnection>, filter_mode: ReportFilterMode, page_size: u64) -> Self {
        Self {
            repository: ProductionRepository::new(db.clone()),
            db,
            filter_mode,
            page_size,
        }
    }

    #[instrument(skip(self))]
    pub async fn get_production_report_records(
        &self,
        page: u64,
        filter: &ReportFilter,
    ) -> Result<Page<ProductionReportResponse>, ServiceError> {
        let (reports, total) = self
            .repository
            .find_reports(filter, self.filter_mode, page, self.page_size)
            .await?;

        Ok(Page {
            items: reports.into_iter().map(ProductionReportResponse::from).collect(),
            total,
            page,
            page_size: self.page_size,
        })
    }

    #[instrument(skip(self))]
    pub async fn get_production_details(
        &self,
        production_status_code: i32,
    ) -> Result<Vec<ProductionDetailResponse>, ServiceError> {
        let report = self
            .repository
            .find_report(production_status_code)
            .await?
            .ok_or(ServiceError::NotFound(ErrorCode::NotFoundProductionCode))?;

        let details = self.repository.details_of(&report).await?;
        Ok(details.into_iter().map(ProductionDetailResponse::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn get_defect_details(
        &self,
        production_detail_code: i32,
    ) -> Result<Vec<DefectDetailResponse>, ServiceError> {
        let detail = self
            .repository
            .find_detail(production_detail_code)
            .await?
            .ok_or(ServiceError::NotFound(ErrorCode::NotFoundProductionDetail))?;

        let defects = self.repository.defects_of(&detail).await?;
        Ok(defects.into_iter().map(DefectDetailResponse::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn calculate_total_production_quantity(&self) -> Result<i64, ServiceError> {
        self.repository.total_production_quantity().await
    }

    /// Stores a report, its details and their defects in one transaction and
    /// returns the new report id.
    ///
    /// A defect is stored under a detail only when its declared
    /// `production_detail_code` equals the id that detail was given on
    /// insert. Defects that never match are dropped.
    #[instrument(
        skip(self, request),
        fields(
            details = request.production_details.len(),
            defects = request.defect_details.len()
        )
    )]
    pub async fn report_save(&self, request: ReportCreateRequest) -> Result<i32, ServiceError> {
        request.validate()?;
        let started = Instant::now();

        let ReportCreateRequest {
            production_management: header,
            production_details,
            defect_details,
        } = request;

        let mut defects_by_parent: HashMap<i32, Vec<DefectDetailCreateRequest>> = HashMap::new();
        for defect in defect_details {
            defects_by_parent
                .entry(defect.production_detail_code)
                .or_default()
                .push(defect);
        }

        let result = with_transaction::<_, _, ServiceError>(&self.db, move |txn| {
            Box::pin(async move {
                let report = production_management::ActiveModel {
                    start_at: Set(header.start_at),
                    completed_at: Set(header.completed_at),
                    total_production_quantity: Set(header.total_production_quantity),
                    production_file: Set(header.production_file),
                    production_status: Set(header.production_status),
                    ..Default::default()
                }
                .insert(txn)
                .await?;

                for detail in production_details {
                    let work_order = work_order::Entity::find_by_id(detail.work_order_code)
                        .one(txn)
                        .await?
                        .ok_or(ServiceError::NotFound(ErrorCode::NotFoundWorkOrder))?;

                    let accounted =
                        i64::from(detail.completely_quantity) + i64::from(detail.defect_quantity);
                    if accounted > i64::from(detail.production_quantity) {
                        warn!(
                            work_order_code = work_order.work_order_code,
                            produced = detail.production_quantity,
                            completed = detail.completely_quantity,
                            defective = detail.defect_quantity,
                            "completed and defective quantities exceed produced quantity"
                        );
                    }

                    let saved = production_detail::ActiveModel {
                        production_status_code: Set(report.production_status_code),
                        work_order_code: Set(work_order.work_order_code),
                        production_quantity: Set(detail.production_quantity),
                        defect_quantity: Set(detail.defect_quantity),
                        completely_quantity: Set(detail.completely_quantity),
                        inspection_date: Set(detail.inspection_date),
                        inspection_status: Set(detail.inspection_status),
                        production_memo: Set(detail.production_memo),
                        production_status: Set(detail.production_status),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await?;

                    let Some(defects) = defects_by_parent.remove(&saved.production_detail_code)
                    else {
                        continue;
                    };
                    for defect in defects {
                        defect_detail::ActiveModel {
                            production_detail_code: Set(saved.production_detail_code),
                            defect_reason: Set(defect.defect_reason),
                            defect_status: Set(defect.defect_status),
                            defect_file: Set(defect.defect_file),
                            ..Default::default()
                        }
                        .insert(txn)
                        .await?;
                    }
                }

                if !defects_by_parent.is_empty() {
                    let dropped: usize = defects_by_parent.values().map(Vec::len).sum();
                    let mut parents: Vec<i32> = defects_by_parent.into_keys().collect();
                    parents.sort_unstable();
                    warn!(
                        dropped,
                        ?parents,
                        "defects reference no detail created with this report and were dropped"
                    );
                    counter!("plantfloor.production.defects_dropped", dropped as u64);
                }

                Ok(report.production_status_code)
            })
        })
        .await;

        histogram!(
            "plantfloor.production.report_save_seconds",
            started.elapsed().as_secs_f64()
        );

        match result {
            Ok(id) => {
                counter!("plantfloor.production.reports_created", 1);
                info!(production_status_code = id, "production report registered");
                Ok(id)
            }
            Err(e) => {
                counter!("plantfloor.production.report_save_failures", 1);
                warn!(error = %e, "production report registration rolled back");
                Err(e)
            }
        }
    }
}
