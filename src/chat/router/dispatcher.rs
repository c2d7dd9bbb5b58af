use super::context::{CallArgs, NarrativeContext};
use super::entities::{Entities, EntityField};
use super::registry::{FunctionCategory, FunctionRegistry, FunctionSpec, TagProfile};
use crate::chat::fallback;
use crate::narrative::generate_narrative;
use crate::plots::{
    ComparisonResult, DataFrame, Figure, MapResult, RankingResult, TimeSeriesResult,
};
use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{error, info, warn};

/// Visualization functions, one method per call convention.
///
/// `Ok(None)` signals an empty result; `Err` is an unexpected failure.
pub trait PlotBackend {
    fn compare(
        &self,
        function: &FunctionSpec,
        first: &str,
        second: &str,
    ) -> Result<Option<ComparisonResult>>;

    /// `text` is the raw user input; the row count is parsed from it.
    fn rank(&self, function: &FunctionSpec, text: &str) -> Result<Option<RankingResult>>;

    fn map(&self, function: &FunctionSpec, year: Option<i32>) -> Result<Option<MapResult>>;

    fn series(&self, function: &FunctionSpec, args: &CallArgs)
        -> Result<Option<TimeSeriesResult>>;
}

/// Outcome of one dispatch. A warning never comes with data.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DispatchResult {
    Warning { message: String },
    Chart { figure: Figure, narration: String },
    Table { dataframe: DataFrame, narration: String },
}

impl DispatchResult {
    pub fn warning(message: impl Into<String>) -> Self {
        Self::Warning {
            message: message.into(),
        }
    }

    pub fn warning_text(&self) -> Option<&str> {
        match self {
            Self::Warning { message } => Some(message),
            _ => None,
        }
    }

    pub fn figure(&self) -> Option<&Figure> {
        match self {
            Self::Chart { figure, .. } => Some(figure),
            _ => None,
        }
    }

    pub fn dataframe(&self) -> Option<&DataFrame> {
        match self {
            Self::Table { dataframe, .. } => Some(dataframe),
            _ => None,
        }
    }

    pub fn narration(&self) -> Option<&str> {
        match self {
            Self::Chart { narration, .. } | Self::Table { narration, .. } => Some(narration),
            Self::Warning { .. } => None,
        }
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, Self::Warning { .. })
    }
}

/// Routes a classified turn to its plot function and narrates the result.
pub struct Dispatcher {
    registry: FunctionRegistry,
}

impl Dispatcher {
    pub fn new(registry: FunctionRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &FunctionRegistry {
        &self.registry
    }

    /// Never fails: errors from the backend become the technical warning.
    pub fn dispatch<B: PlotBackend + ?Sized>(
        &self,
        backend: &B,
        tag: &str,
        function_name: &str,
        user_input: &str,
        entities: &Entities,
    ) -> DispatchResult {
        let profile = TagProfile::of(tag);
        match self.try_dispatch(backend, profile, tag, function_name, user_input, entities) {
            Ok(result) => {
                match result.warning_text() {
                    Some(message) => {
                        warn!(tag, function = function_name, warning = message, "dispatch warning")
                    }
                    None => info!(
                        tag,
                        function = function_name,
                        category = ?profile.category,
                        "dispatch succeeded"
                    ),
                }
                result
            }
            Err(err) => {
                error!(tag, function = function_name, "visualization failed: {err:#}");
                DispatchResult::warning(fallback::technical_error())
            }
        }
    }

    fn try_dispatch<B: PlotBackend + ?Sized>(
        &self,
        backend: &B,
        profile: TagProfile,
        tag: &str,
        function_name: &str,
        user_input: &str,
        entities: &Entities,
    ) -> Result<DispatchResult> {
        let function = self
            .registry
            .get(function_name)
            .with_context(|| format!("Function '{function_name}' is not registered"))?;
        let mut context = NarrativeContext::from_entities(user_input, entities);

        let figure = match profile.category {
            FunctionCategory::Comparison => {
                let field = if tag.contains("desa") {
                    EntityField::Desa
                } else {
                    EntityField::Provinsi
                };
                let (first, second) = match entities.get(field) {
                    Some([first, second, ..]) => (first, second),
                    _ => return Ok(DispatchResult::warning(fallback::need_two_names(field))),
                };
                let Some(result) = backend.compare(function, first, second)? else {
                    return Ok(DispatchResult::warning(fallback::data_not_found()));
                };
                context.set_pair(field, first, second);
                context.df = Some(result.data);
                result.figure
            }
            FunctionCategory::Ranking => {
                let table = match backend.rank(function, user_input)? {
                    Some(result) if !result.table.is_empty() => result.table,
                    _ => return Ok(DispatchResult::warning(fallback::ranking_not_found())),
                };
                context.df = Some(DataFrame::Ranking(table));
                let narration = generate_narrative(tag, &context);
                let dataframe = context
                    .df
                    .take()
                    .context("Ranking table missing after narration")?;
                return Ok(DispatchResult::Table {
                    dataframe,
                    narration,
                });
            }
            FunctionCategory::Map => {
                let year = if tag.contains("tahun") {
                    let Some(raw) = context.tahun.as_deref() else {
                        return Ok(DispatchResult::warning(fallback::map_year_missing()));
                    };
                    Some(
                        raw.trim()
                            .parse::<i32>()
                            .with_context(|| format!("Invalid map year '{raw}'"))?,
                    )
                } else {
                    None
                };
                let Some(map) = backend.map(function, year)? else {
                    return Ok(DispatchResult::warning(fallback::map_not_found()));
                };
                context.region_max = Some(map.region_max);
                context.region_min = Some(map.region_min);
                context.prov_max = Some(map.prov_max);
                context.prov_min = Some(map.prov_min);
                map.figure
            }
            FunctionCategory::Generic => {
                if let Some(message) = unresolved_argument(function, &context, entities) {
                    return Ok(DispatchResult::warning(message));
                }
                let args = context.call_args(function.params);
                let Some(result) = backend.series(function, &args)? else {
                    return Ok(DispatchResult::warning(fallback::data_not_found()));
                };
                context.df = Some(result.data);
                context.trend = result.trend;
                result.figure
            }
        };

        let narration = generate_narrative(tag, &context);
        Ok(DispatchResult::Chart { figure, narration })
    }
}

/// Warning for the first required argument that is absent or extracted more
/// than once.
fn unresolved_argument(
    function: &FunctionSpec,
    context: &NarrativeContext,
    entities: &Entities,
) -> Option<String> {
    function.required_params().find_map(|name| {
        if context.value_of(name).is_some() {
            return None;
        }
        let field = EntityField::from_label(name)?;
        Some(match entities.get(field) {
            Some(values) if values.len() > 1 => fallback::ambiguous_argument(field, values),
            _ => fallback::missing_argument(field),
        })
    })
}
