use hecs::Entity;

/// Startup and registration failures. Nothing that happens inside a
/// detection pass is an error; lights that cannot contribute are skipped.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum DetectionError {
    #[error("no entity with a Player component and a LocalTransform was found")]
    MissingPlayer,

    #[error("invalid detection config: {0}")]
    InvalidConfig(String),

    #[error("light {entity:?} rejected: {reason}")]
    InvalidLight { entity: Entity, reason: String },

    #[error("entity {0:?} has no LightSource and LocalTransform")]
    NotALight(Entity),
}

impl DetectionError {
    pub fn config<T: ToString>(msg: T) -> Self {
        DetectionError::InvalidConfig(msg.to_string())
    }

    pub fn light<T: ToString>(entity: Entity, reason: T) -> Self {
        DetectionError::InvalidLight {
            entity,
            reason: reason.to_string(),
        }
    }
}
