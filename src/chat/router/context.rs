use super::entities::{Entities, EntityField};
use super::registry::Param;
use crate::plots::DataFrame;
use anyhow::{bail, Context, Result};
use std::collections::BTreeMap;

/// Values the narrator can draw on for one turn.
///
/// Location fields hold a value only when extraction found exactly one;
/// comparison pairs arrive through `desa1`/`desa2` and
/// `provinsi1`/`provinsi2` instead.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NarrativeContext {
    pub user_input: String,
    pub desa: Option<String>,
    pub kecamatan: Option<String>,
    pub kabupaten: Option<String>,
    pub provinsi: Option<String>,
    pub tahun: Option<String>,
    pub desa1: Option<String>,
    pub desa2: Option<String>,
    pub provinsi1: Option<String>,
    pub provinsi2: Option<String>,
    pub df: Option<DataFrame>,
    pub trend: Option<f64>,
    pub region_max: Option<String>,
    pub region_min: Option<String>,
    pub prov_max: Option<String>,
    pub prov_min: Option<String>,
}

impl NarrativeContext {
    pub fn from_entities(user_input: &str, entities: &Entities) -> Self {
        let single = |field: EntityField| entities.single(field).map(str::to_string);
        Self {
            user_input: user_input.to_string(),
            desa: single(EntityField::Desa),
            kecamatan: single(EntityField::Kecamatan),
            kabupaten: single(EntityField::Kabupaten),
            provinsi: single(EntityField::Provinsi),
            tahun: single(EntityField::Tahun),
            ..Self::default()
        }
    }

    /// Sets `{field}1` and `{field}2` for a comparison.
    pub fn set_pair(&mut self, field: EntityField, first: &str, second: &str) {
        let (a, b) = match field {
            EntityField::Desa => (&mut self.desa1, &mut self.desa2),
            _ => (&mut self.provinsi1, &mut self.provinsi2),
        };
        *a = Some(first.to_string());
        *b = Some(second.to_string());
    }

    /// Text-valued field by name, as used in parameter manifests.
    pub fn value_of(&self, name: &str) -> Option<&str> {
        let value = match name {
            "user_input" | "text" => return Some(&self.user_input),
            "desa" => &self.desa,
            "kecamatan" => &self.kecamatan,
            "kabupaten" => &self.kabupaten,
            "provinsi" => &self.provinsi,
            "tahun" | "year" => &self.tahun,
            "desa1" => &self.desa1,
            "desa2" => &self.desa2,
            "provinsi1" => &self.provinsi1,
            "provinsi2" => &self.provinsi2,
            _ => return None,
        };
        value.as_deref()
    }

    /// Context values whose names appear in `params`.
    pub fn call_args(&self, params: &[Param]) -> CallArgs {
        let mut args = CallArgs::default();
        for param in params {
            if let Some(value) = self.value_of(param.name) {
                args.insert(param.name, value);
            }
        }
        args
    }
}

/// Named arguments for one plot-function call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallArgs(BTreeMap<&'static str, String>);

impl CallArgs {
    pub fn insert(&mut self, name: &'static str, value: impl Into<String>) {
        self.0.insert(name, value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn require(&self, name: &str) -> Result<&str> {
        match self.get(name) {
            Some(value) => Ok(value),
            None => bail!("Missing required argument '{name}'"),
        }
    }

    /// Optional year argument parsed as an integer.
    pub fn year(&self, name: &str) -> Result<Option<i32>> {
        self.get(name)
            .map(|raw| {
                raw.trim()
                    .parse::<i32>()
                    .with_context(|| format!("Argument '{name}' is not a year: {raw}"))
            })
            .transpose()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
