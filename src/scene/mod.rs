use std::fmt::{self, Display, Formatter};

use log::info;

use crate::pipeline::Buffer;

pub mod cube;
pub mod star;

pub use cube::CubeScene;
pub use star::StarScene;

/// Capabilities a scene advertises to the frame driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SceneFlags(pub u32);

impl SceneFlags {
    /// No special behavior.
    pub const NOP: SceneFlags = SceneFlags(0);

    pub fn contains(&self, other: SceneFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

/// A live scene instance. The implementing type is the scene's private state,
/// built by its descriptor's `create` and mutated once per frame by `update`.
pub trait Scene {
    fn update(&mut self, buf: &mut dyn Buffer);

    /// Release the instance. Anything beyond dropping goes here.
    fn destroy(self: Box<Self>) {}
}

/// Everything needed to bring a scene up: the flags plus its constructor.
#[derive(Clone, Copy)]
pub struct SceneDescriptor {
    pub name: &'static str,
    pub flags: SceneFlags,
    pub create: fn() -> Box<dyn Scene>,
}

impl fmt::Debug for SceneDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneDescriptor")
            .field("name", &self.name)
            .field("flags", &self.flags)
            .finish()
    }
}

pub const SCENES: &[SceneDescriptor] = &[cube::DESCRIPTOR, star::DESCRIPTOR];

pub fn find_scene(name: &str) -> Option<SceneDescriptor> {
    SCENES.iter().copied().find(|s| s.name == name)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Uninitialized,
    Created,
    Destroyed,
}

impl Display for Lifecycle {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Lifecycle::Uninitialized => write!(f, "uninitialized"),
            Lifecycle::Created => write!(f, "created"),
            Lifecycle::Destroyed => write!(f, "destroyed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SceneError {
    #[error("scene '{scene}' cannot {op} while {state}")]
    InvalidTransition {
        scene: &'static str,
        op: &'static str,
        state: Lifecycle,
    },
}

enum Slot {
    Uninitialized,
    Created(Box<dyn Scene>),
    Destroyed,
}

/// The single active scene and where it is in its lifecycle.
pub struct ActiveScene {
    descriptor: SceneDescriptor,
    slot: Slot,
}

impl ActiveScene {
    pub fn new(descriptor: SceneDescriptor) -> Self {
        Self {
            descriptor,
            slot: Slot::Uninitialized,
        }
    }

    pub fn name(&self) -> &'static str {
        self.descriptor.name
    }

    pub fn lifecycle(&self) -> Lifecycle {
        match self.slot {
            Slot::Uninitialized => Lifecycle::Uninitialized,
            Slot::Created(_) => Lifecycle::Created,
            Slot::Destroyed => Lifecycle::Destroyed,
        }
    }

    fn invalid(&self, op: &'static str) -> SceneError {
        SceneError::InvalidTransition {
            scene: self.descriptor.name,
            op,
            state: self.lifecycle(),
        }
    }

    pub fn create(&mut self) -> Result<(), SceneError> {
        if !matches!(self.slot, Slot::Uninitialized) {
            return Err(self.invalid("create"));
        }
        self.slot = Slot::Created((self.descriptor.create)());
        info!("scene '{}' created", self.descriptor.name);
        Ok(())
    }

    pub fn update(&mut self, buf: &mut dyn Buffer) -> Result<(), SceneError> {
        if let Slot::Created(scene) = &mut self.slot {
            scene.update(buf);
            return Ok(());
        }
        Err(self.invalid("update"))
    }

    pub fn destroy(&mut self) -> Result<(), SceneError> {
        match std::mem::replace(&mut self.slot, Slot::Destroyed) {
            Slot::Created(scene) => {
                scene.destroy();
                info!("scene '{}' destroyed", self.descriptor.name);
                Ok(())
            }
            previous => {
                self.slot = previous;
                Err(self.invalid("destroy"))
            }
        }
    }
}
