use cloudwaste_api::models::*;
use utoipa::OpenApi;

use crate::handles;

#[derive(OpenApi)]
#[openapi(
    info(title = "CloudWaste Yaoundé API"),
    paths(
        handles::get_bins,
        handles::get_bin_by_id,
        handles::ingest_sensor_data,
        handles::get_sensor_data,
        handles::get_bins_by_neighborhood,
        handles::get_reports,
        handles::create_report,
        handles::update_report_status,
        handles::get_trucks,
        handles::update_truck_location,
        handles::create_collection,
        handles::get_collection_history,
        handles::get_stats,
        handles::optimize_route,
        handles::health,
    ),
    components(schemas(
        Bin,
        BinStatus,
        SensorDataRequest,
        SensorDataResponse,
        SensorReading,
        Report,
        ReportDetail,
        CreateReportRequest,
        CreateReportResponse,
        UpdateReportRequest,
        Truck,
        TruckStatus,
        TruckLocationRequest,
        CreateCollectionRequest,
        HistoryEntry,
        Stats,
        RouteStop,
        RouteResponse,
        HealthResponse,
        ErrorResponse,
        MessageResponse,
        SuccessResponse,
    )),
    tags(
        (name = "bin", description = "Smart bins and their telemetry"),
        (name = "report", description = "Citizen reports"),
        (name = "truck", description = "Collection trucks"),
        (name = "collection", description = "Pickups and their history"),
        (name = "analytics", description = "Dashboard counters and routing")
    )
)]
pub struct ApiDoc;
