use hecs::{Entity, World};
use log::{debug, warn};

use crate::components::{LightKindTag, LightSource, LocalTransform};
use crate::detection::config::DiscoveryFilter;
use crate::error::DetectionError;

/// Append-only set of lights the detector evaluates.
///
/// Entries are kept in evaluation order (point, spot, rect, directional),
/// registration order within a kind. Only the first directional light is
/// kept; it is the scene's main light.
#[derive(Debug, Default, Clone)]
pub struct LightRegistry {
    entries: Vec<(LightKindTag, Entity)>,
}

impl LightRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one light entity. Positional lights need a `LocalTransform`.
    pub fn register(&mut self, world: &World, entity: Entity) -> Result<LightKindTag, DetectionError> {
        let light = world
            .get::<&LightSource>(entity)
            .map_err(|_| DetectionError::NotALight(entity))?;
        let tag = light.tag();
        if tag != LightKindTag::Directional && world.get::<&LocalTransform>(entity).is_err() {
            return Err(DetectionError::NotALight(entity));
        }
        light
            .validate()
            .map_err(|reason| DetectionError::light(entity, reason))?;

        if self.contains(entity) {
            return Ok(tag);
        }
        if tag == LightKindTag::Directional && self.main_directional().is_some() {
            warn!("ignoring extra directional light {entity:?}, one is already registered");
            return Ok(tag);
        }

        let at = self.entries.partition_point(|(existing, _)| *existing <= tag);
        self.entries.insert(at, (tag, entity));
        debug!("registered {tag:?} light {entity:?}");
        Ok(tag)
    }

    /// Startup scan over every `LightSource` in the world. Lights that fail
    /// validation are logged and left out. Returns how many were added.
    pub fn discover(&mut self, world: &World, filter: DiscoveryFilter) -> usize {
        let mut found: Vec<(Entity, LightKindTag)> = world
            .query::<&LightSource>()
            .iter()
            .map(|(entity, light)| (entity, light.tag()))
            .filter(|(_, tag)| {
                filter == DiscoveryFilter::All
                    || matches!(tag, LightKindTag::Point | LightKindTag::Spot)
            })
            .collect();
        found.sort_by_key(|(entity, _)| entity.id());

        let before = self.len();
        for (entity, _) in found {
            if let Err(err) = self.register(world, entity) {
                warn!("light discovery: {err}");
            }
        }
        let added = self.len() - before;
        debug!("light discovery added {added} lights ({filter:?})");
        added
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.entries.iter().any(|(_, e)| *e == entity)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lights in evaluation order.
    pub fn iter(&self) -> impl Iterator<Item = (LightKindTag, Entity)> + '_ {
        self.entries.iter().copied()
    }

    pub fn of_kind(&self, tag: LightKindTag) -> impl Iterator<Item = Entity> + '_ {
        self.entries
            .iter()
            .filter(move |(t, _)| *t == tag)
            .map(|(_, e)| *e)
    }

    pub fn main_directional(&self) -> Option<Entity> {
        self.of_kind(LightKindTag::Directional).next()
    }
}
