//! Production report registration and lookups.

mod common;

use assert_matches::assert_matches;
use common::{at, TestApp};
use plantfloor_api::{
    dto::production::{
        DefectDetailCreateRequest, ProductionDetailCreateRequest,
        ProductionManagementCreateRequest, ProductionReportResponse, ReportCreateRequest,
    },
    entities::{
        production_detail::InspectionStatusType, production_management::ProductionStatusType,
    },
    errors::{ErrorCode, ServiceError},
    repositories::{ReportFilter, ReportFilterMode},
    services::Page,
};

fn header(status: ProductionStatusType, start_hour: u32) -> ProductionManagementCreateRequest {
    ProductionManagementCreateRequest {
        start_at: at(2024, 3, 1, start_hour),
        completed_at: Some(at(2024, 3, 1, 17)),
        total_production_quantity: 100,
        production_file: None,
        production_status: status,
    }
}

fn detail(work_order_code: i32, defective: i32, completed: i32) -> ProductionDetailCreateRequest {
    ProductionDetailCreateRequest {
        work_order_code,
        production_quantity: defective + completed,
        defect_quantity: defective,
        completely_quantity: completed,
        inspection_date: None,
        inspection_status: Some(InspectionStatusType::Passed),
        production_memo: Some("line 2".to_string()),
        production_status: ProductionStatusType::ProductionCompleted,
    }
}

fn defect(parent: i32, reason: &str) -> DefectDetailCreateRequest {
    DefectDetailCreateRequest {
        production_detail_code: parent,
        defect_reason: reason.to_string(),
        defect_status: "OPEN".to_string(),
        defect_file: None,
    }
}

/// Seeds `count` work orders, numbered from 1.
async fn app_with_work_orders(count: usize) -> TestApp {
    let app = TestApp::with_config(|cfg| cfg.report_page_size = 2).await;
    let product = app.seed_product("Bracket").await;
    let employee = app.seed_employee("Kim").await;
    for _ in 0..count {
        app.seed_work_order(product.product_code, employee.employee_code, 100)
            .await;
    }
    app
}

#[tokio::test]
async fn defect_attaches_by_generated_detail_id() {
    let app = app_with_work_orders(5).await;
    let production = app.state.services.production.clone();

    // The detail for work order 5 is the first detail ever stored, so it gets id 1.
    let report = production
        .report_save(ReportCreateRequest {
            production_management: header(ProductionStatusType::ProductionCompleted, 8),
            production_details: vec![detail(5, 2, 98)],
            defect_details: vec![defect(5, "scratch")],
        })
        .await
        .unwrap();

    let details = production.get_production_details(report).await.unwrap();
    assert_eq!(details.len(), 1);
    assert_eq!(details[0].work_order_code, 5);
    assert_eq!(details[0].production_detail_code, 1);
    assert!(production
        .get_defect_details(details[0].production_detail_code)
        .await
        .unwrap()
        .is_empty());

    // Declaring the generated id attaches the defect.
    let report = production
        .report_save(ReportCreateRequest {
            production_management: header(ProductionStatusType::ProductionCompleted, 9),
            production_details: vec![detail(5, 2, 98)],
            defect_details: vec![defect(2, "dent"), defect(2, "burr")],
        })
        .await
        .unwrap();

    let details = production.get_production_details(report).await.unwrap();
    assert_eq!(details[0].production_detail_code, 2);
    let defects = production.get_defect_details(2).await.unwrap();
    let reasons: Vec<&str> = defects.iter().map(|d| d.defect_reason.as_str()).collect();
    assert_eq!(reasons, vec!["dent", "burr"]);
}

#[tokio::test]
async fn missing_work_order_rolls_back_everything() {
    let app = app_with_work_orders(1).await;
    let production = app.state.services.production.clone();

    let err = production
        .report_save(ReportCreateRequest {
            production_management: header(ProductionStatusType::ProductionCompleted, 8),
            production_details: vec![detail(1, 1, 9), detail(42, 0, 10)],
            defect_details: vec![defect(1, "scratch")],
        })
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::NotFound(ErrorCode::NotFoundWorkOrder));

    let reports = production
        .get_production_report_records(1, &ReportFilter::default())
        .await
        .unwrap();
    assert_eq!(reports.total, 0);
    assert_eq!(
        production.calculate_total_production_quantity().await.unwrap(),
        0
    );
    assert_matches!(
        production.get_defect_details(1).await,
        Err(ServiceError::NotFound(ErrorCode::NotFoundProductionDetail))
    );
}

#[tokio::test]
async fn details_keep_submission_order() {
    let app = app_with_work_orders(3).await;
    let production = app.state.services.production.clone();

    let report = production
        .report_save(ReportCreateRequest {
            production_management: header(ProductionStatusType::ProductionInProgress, 8),
            production_details: vec![detail(3, 0, 10), detail(1, 0, 20), detail(2, 0, 30)],
            defect_details: vec![],
        })
        .await
        .unwrap();

    let orders: Vec<i32> = production
        .get_production_details(report)
        .await
        .unwrap()
        .iter()
        .map(|d| d.work_order_code)
        .collect();
    assert_eq!(orders, vec![3, 1, 2]);
}

#[tokio::test]
async fn unknown_codes_are_not_found() {
    let app = app_with_work_orders(0).await;
    let production = app.state.services.production.clone();

    assert_matches!(
        production.get_production_details(999).await,
        Err(ServiceError::NotFound(ErrorCode::NotFoundProductionCode))
    );
    assert_matches!(
        production.get_defect_details(999).await,
        Err(ServiceError::NotFound(ErrorCode::NotFoundProductionDetail))
    );
}

#[tokio::test]
async fn total_quantity_sums_defective_and_completed() {
    let app = app_with_work_orders(2).await;
    let production = app.state.services.production.clone();

    for lines in [vec![detail(1, 2, 98)], vec![detail(2, 5, 45), detail(1, 0, 10)]] {
        production
            .report_save(ReportCreateRequest {
                production_management: header(ProductionStatusType::ProductionCompleted, 8),
                production_details: lines,
                defect_details: vec![],
            })
            .await
            .unwrap();
    }

    assert_eq!(
        production.calculate_total_production_quantity().await.unwrap(),
        160
    );
}

async fn seed_reports(app: &TestApp) {
    let production = app.state.services.production.clone();
    for (status, hour) in [
        (ProductionStatusType::RegisterProduction, 8),
        (ProductionStatusType::ProductionCompleted, 9),
        (ProductionStatusType::ProductionCompleted, 10),
        (ProductionStatusType::RegisterProduction, 10),
    ] {
        production
            .report_save(ReportCreateRequest {
                production_management: header(status, hour),
                production_details: vec![],
                defect_details: vec![],
            })
            .await
            .unwrap();
    }
}

fn codes(page: &Page<ProductionReportResponse>) -> Vec<i32> {
    page.items.iter().map(|r| r.production_status_code).collect()
}

#[tokio::test]
async fn reports_are_paged_newest_first() {
    let app = app_with_work_orders(0).await;
    seed_reports(&app).await;
    let production = app.state.services.production.clone();

    let first = production
        .get_production_report_records(1, &ReportFilter::default())
        .await
        .unwrap();
    let second = production
        .get_production_report_records(2, &ReportFilter::default())
        .await
        .unwrap();

    assert_eq!(first.total, 4);
    assert_eq!(codes(&first), vec![4, 3]);
    assert_eq!(codes(&second), vec![2, 1]);
}

#[tokio::test]
async fn largest_report_page_is_empty() {
    let app = app_with_work_orders(0).await;
    seed_reports(&app).await;

    let page = app
        .state
        .services
        .production
        .get_production_report_records(i64::MAX as u64, &ReportFilter::default())
        .await
        .unwrap();

    assert!(page.items.is_empty());
    assert_eq!(page.total, 4);
}

#[tokio::test]
async fn status_code_matches_only_registered_reports() {
    let app = app_with_work_orders(0).await;
    seed_reports(&app).await;
    let production = app.state.services.production.clone();

    let registered = production
        .get_production_report_records(
            1,
            &ReportFilter {
                status_code: Some(1),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(codes(&registered), vec![1]);

    let completed = production
        .get_production_report_records(
            1,
            &ReportFilter {
                status_code: Some(2),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(completed.items.is_empty());

    let unset = production
        .get_production_report_records(
            1,
            &ReportFilter {
                status_code: Some(0),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(unset.total, 4);
}

#[tokio::test]
async fn conjunctive_and_first_match_modes_differ() {
    let filter = ReportFilter {
        status_type: Some(ProductionStatusType::ProductionCompleted),
        start_at: Some(at(2024, 3, 1, 10)),
        ..Default::default()
    };

    let conjunctive = app_with_work_orders(0).await;
    seed_reports(&conjunctive).await;
    let page = conjunctive
        .state
        .services
        .production
        .get_production_report_records(1, &filter)
        .await
        .unwrap();
    assert_eq!(codes(&page), vec![3]);

    let first_match =
        TestApp::with_config(|cfg| cfg.report_filter_mode = ReportFilterMode::FirstMatch).await;
    seed_reports(&first_match).await;
    let page = first_match
        .state
        .services
        .production
        .get_production_report_records(1, &filter)
        .await
        .unwrap();
    assert_eq!(codes(&page), vec![3, 2]);
}
