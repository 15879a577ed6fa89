//! Builder over a terrain view (spec §6): constructs the gateway graph and
//! water-component labelling once, lazily on first use unless the caller
//! calls [`PathfinderBuilder::initialize`] explicitly (spec §7 "graph not
//! initialized").

use crate::components::WaterComponents;
use crate::config::PathfinderConfig;
use crate::gateway::{build_gateway_graph, GatewayGraph};
use crate::hierarchical::HierarchicalPathfinder;
use crate::stepping::{SteppingFacade, StepOutcome};
use crate::terrain::{Cell, Minimap, TerrainView};
use crate::transform::{
    BresenhamSmoothingTransformer, ComponentCheckTransformer, MinimapTransformer, Pathfinder, ShoreCoercingTransformer,
};

/// The fully assembled water pathfinder: smoothing wraps the entire
/// minimap pipeline (so it runs on full-resolution coordinates), which in
/// turn wraps shore-coercion, component gating and the hierarchical core,
/// all at minimap resolution (spec §4.8, with the smoothing-placement
/// contradiction between §4.8's literal order and §9's open question
/// resolved in favour of post-upscale smoothing — see DESIGN.md).
pub struct WaterPathfinder<'a> {
    facade: SteppingFacade<Box<dyn Pathfinder + 'a>>,
}

impl<'a> WaterPathfinder<'a> {
    pub fn find_path(&mut self, from: &[Cell], to: Cell) -> Option<Vec<Cell>> {
        self.facade.find_path(from, to)
    }

    pub fn next(&mut self, from: Cell, to: Cell, dist: Option<u32>) -> StepOutcome {
        self.facade.next(from, to, dist)
    }

    pub fn invalidate(&mut self) {
        self.facade.invalidate()
    }
}

pub struct PathfinderBuilder<'a, T> {
    terrain: &'a T,
    minimap: Minimap<'a, T>,
    config: PathfinderConfig,
    graph: Option<GatewayGraph>,
    components: Option<WaterComponents>,
}

impl<'a, T: TerrainView> PathfinderBuilder<'a, T> {
    pub fn new(terrain: &'a T, config: PathfinderConfig) -> Self {
        Self {
            terrain,
            minimap: Minimap::new(terrain),
            config,
            graph: None,
            components: None,
        }
    }

    /// Builds the gateway graph and water-component labels. Idempotent;
    /// safe to call more than once.
    pub fn initialize(&mut self) {
        if self.graph.is_none() {
            self.graph = Some(build_gateway_graph(
                &self.minimap,
                self.config.cluster_size as usize,
                self.config.cache_refined_edges,
            ));
        }
        if self.components.is_none() {
            self.components = Some(WaterComponents::build(&self.minimap));
        }
    }

    fn ensure_initialized(&mut self) {
        if self.graph.is_none() || self.components.is_none() {
            self.initialize();
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.graph.is_some() && self.components.is_some()
    }

    /// Assembles the transformer pipeline into a ready-to-use stepping
    /// pathfinder, auto-initializing the graph/components if needed.
    pub fn water_pathfinder(&mut self) -> WaterPathfinder<'_> {
        self.ensure_initialized();
        let graph = self.graph.as_ref().unwrap();
        let components = self.components.as_ref().unwrap();

        let hierarchical = HierarchicalPathfinder::new(
            &self.minimap,
            graph,
            self.config.cluster_size,
            self.config.short_distance_bypass_threshold,
        );
        let component_check = ComponentCheckTransformer::new(&self.minimap, components, hierarchical);
        let shore = ShoreCoercingTransformer::new(&self.minimap, component_check);
        let minimap_stage = MinimapTransformer::new(shore);

        let terrain = self.terrain;
        let smoothing = BresenhamSmoothingTransformer::new(minimap_stage, self.config.smoothing_window_base, move |cell: Cell| {
            terrain.tile_at(cell).map(|t| terrain.is_water(t)).unwrap_or(false)
        });

        WaterPathfinder { facade: SteppingFacade::new(Box::new(smoothing)) }
    }
}
