// Route pipeline: validate -> merge -> persist -> graph -> route -> export
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

use crate::common::{ApplicationResult, DomainError};
use crate::config::RouteConfig;
use crate::domains::area_map::{
    build_graph, export_path, merge, shortest_path, validate_category_table, validate_map_table,
    validate_structure_table, ArtifactStore, CategoryCatalog, CategorySummary, GridDataSource,
    GridPath, MapCellRaw, MergedTable, PathRow, StructureRaw, TableRole,
};
use crate::domains::DynLogger;

/// Validated inputs, ready to merge.
#[derive(Debug, Clone)]
pub struct ValidatedInputs {
    pub map: Vec<MapCellRaw>,
    pub structures: Vec<StructureRaw>,
    pub catalog: CategoryCatalog,
}

#[derive(Debug, Clone)]
pub struct MergeReport {
    pub merged: MergedTable,
    pub merged_path: PathBuf,
    pub area_path: Option<PathBuf>,
    pub summary: CategorySummary,
    pub summary_path: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct RouteReport {
    pub path: GridPath,
    pub rows: Vec<PathRow>,
    pub path_table: PathBuf,
}

pub struct RoutePipelineService {
    source: Arc<dyn GridDataSource>,
    store: Arc<dyn ArtifactStore>,
    logger: DynLogger,
}

impl RoutePipelineService {
    pub fn new(source: Arc<dyn GridDataSource>, store: Arc<dyn ArtifactStore>, logger: DynLogger) -> Self {
        Self { source, store, logger }
    }

    /// Load and validate all three tables. Fails on the first problem, before anything is merged.
    pub fn load_inputs(&self) -> ApplicationResult<ValidatedInputs> {
        let categories = validate_category_table(&self.source.load_table(TableRole::Category)?)?;
        let catalog = CategoryCatalog::new(categories)?;
        self.logger.info(&format!("Loaded {} categories", catalog.len()));

        let map = validate_map_table(&self.source.load_table(TableRole::Map)?)?;
        self.logger.info(&format!("Loaded {} map cells", map.len()));

        let structures = validate_structure_table(&self.source.load_table(TableRole::Structure)?, &catalog)?;
        self.logger.info(&format!("Loaded {} structures", structures.len()));

        Ok(ValidatedInputs { map, structures, catalog })
    }

    /// Validate, merge and persist the merged table plus the area subset and report.
    /// Nothing is replaced unless every artifact can be written.
    pub fn run_merge(&self, route: &RouteConfig) -> ApplicationResult<MergeReport> {
        let inputs = self.load_inputs()?;
        let merged = merge(&inputs.map, &inputs.structures, &inputs.catalog);

        let subset = route.area_filter.map(|area| (area, merged.filter_area(area)));
        let summary = match &subset {
            Some((area, cells)) => CategorySummary::from_cells(cells.cells(), Some(*area)),
            None => CategorySummary::from_cells(merged.cells(), None),
        };

        let outputs = self
            .store
            .save_merge_outputs(&merged, subset.as_ref().map(|(_, cells)| cells), &summary)?;
        self.logger.info(&format!(
            "Merged {} cells into {}",
            merged.len(),
            outputs.merged.display()
        ));
        if let (Some((area, cells)), Some(path)) = (&subset, &outputs.area) {
            self.logger.info(&format!(
                "Area {}: {} cells written to {}",
                area,
                cells.len(),
                path.display()
            ));
        }
        for (name, count) in &summary.counts {
            self.logger.info(&format!("  {:<20} {}", name, count));
        }

        Ok(MergeReport {
            merged,
            merged_path: outputs.merged,
            area_path: outputs.area,
            summary,
            summary_path: outputs.summary,
        })
    }

    /// Find the route on the persisted merged table and export it.
    pub fn run_route(&self, route: &RouteConfig) -> ApplicationResult<RouteReport> {
        let merged = self.store.load_merged()?;
        let scope = match route.area {
            Some(area) => merged.filter_area(area),
            None => merged.clone(),
        };
        let graph = build_graph(&scope);
        debug!(nodes = graph.node_count(), edges = graph.edge_count(), "built grid graph");

        let origins = scope.cells_with_category(&route.origin_category);
        let origin = *origins.first().ok_or_else(|| {
            DomainError::path_not_found(format!("no cell named '{}'", route.origin_category))
        })?;
        if origins.len() > 1 {
            self.logger.warn(&format!(
                "{} cells named '{}', starting from {}",
                origins.len(),
                route.origin_category,
                origin
            ));
        }

        let destinations: BTreeSet<_> = scope
            .cells_with_category(&route.destination_category)
            .into_iter()
            .collect();
        if destinations.is_empty() {
            return Err(DomainError::path_not_found(format!(
                "no cell named '{}'",
                route.destination_category
            ))
            .into());
        }

        let path = shortest_path(&graph, origin, &destinations)?;
        let rows = export_path(&merged, &path);
        let path_table = self.store.save_path(&rows)?;
        self.logger.info(&format!(
            "Route {} -> {} takes {} steps, written to {}",
            path.origin(),
            path.destination(),
            path.steps(),
            path_table.display()
        ));

        Ok(RouteReport { path, rows, path_table })
    }

    pub fn run_all(&self, route: &RouteConfig) -> ApplicationResult<(MergeReport, RouteReport)> {
        let merged = self.run_merge(route)?;
        let routed = self.run_route(route)?;
        Ok((merged, routed))
    }
}
