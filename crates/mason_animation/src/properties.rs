//! Animatable properties
//!
//! A [`PropertyMap`] is a sparse set of property values: the "from" or "to"
//! side of a tween, or the currently rendered state of a target.

/// Properties a tween can drive
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Property {
    /// Translation X in pixels
    X,
    /// Translation Y in pixels
    Y,
    Width,
    Height,
    /// Opacity (0.0 to 1.0)
    Opacity,
    /// Uniform scale factor
    Scale,
    /// Gaussian blur radius in pixels
    Blur,
}

impl Property {
    pub const ALL: [Property; 7] = [
        Property::X,
        Property::Y,
        Property::Width,
        Property::Height,
        Property::Opacity,
        Property::Scale,
        Property::Blur,
    ];

    /// Value a target has when the property was never written
    pub fn initial_value(self) -> f32 {
        match self {
            Property::Opacity | Property::Scale => 1.0,
            _ => 0.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Property::X => "x",
            Property::Y => "y",
            Property::Width => "width",
            Property::Height => "height",
            Property::Opacity => "opacity",
            Property::Scale => "scale",
            Property::Blur => "blur",
        }
    }
}

/// A sparse map of property values
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PropertyMap {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub opacity: Option<f32>,
    pub scale: Option<f32>,
    pub blur: Option<f32>,
}

impl PropertyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Position only
    pub fn position(x: f32, y: f32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Default::default()
        }
    }

    /// Position and size
    pub fn rect(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            width: Some(width),
            height: Some(height),
            ..Default::default()
        }
    }

    pub fn opacity(value: f32) -> Self {
        Self {
            opacity: Some(value),
            ..Default::default()
        }
    }

    pub fn scale(value: f32) -> Self {
        Self {
            scale: Some(value),
            ..Default::default()
        }
    }

    /// Builder: set any property
    pub fn with(mut self, property: Property, value: f32) -> Self {
        self.set(property, value);
        self
    }

    pub fn with_opacity(self, value: f32) -> Self {
        self.with(Property::Opacity, value)
    }

    pub fn with_blur(self, px: f32) -> Self {
        self.with(Property::Blur, px)
    }

    fn slot(&self, property: Property) -> &Option<f32> {
        match property {
            Property::X => &self.x,
            Property::Y => &self.y,
            Property::Width => &self.width,
            Property::Height => &self.height,
            Property::Opacity => &self.opacity,
            Property::Scale => &self.scale,
            Property::Blur => &self.blur,
        }
    }

    fn slot_mut(&mut self, property: Property) -> &mut Option<f32> {
        match property {
            Property::X => &mut self.x,
            Property::Y => &mut self.y,
            Property::Width => &mut self.width,
            Property::Height => &mut self.height,
            Property::Opacity => &mut self.opacity,
            Property::Scale => &mut self.scale,
            Property::Blur => &mut self.blur,
        }
    }

    pub fn get(&self, property: Property) -> Option<f32> {
        *self.slot(property)
    }

    /// Value of `property`, or its initial value when unset
    pub fn resolved(&self, property: Property) -> f32 {
        self.get(property).unwrap_or_else(|| property.initial_value())
    }

    pub fn set(&mut self, property: Property, value: f32) {
        *self.slot_mut(property) = Some(value);
    }

    pub fn clear(&mut self, property: Property) -> Option<f32> {
        self.slot_mut(property).take()
    }

    pub fn contains(&self, property: Property) -> bool {
        self.slot(property).is_some()
    }

    pub fn is_empty(&self) -> bool {
        Property::ALL.iter().all(|p| !self.contains(*p))
    }

    /// Iterate over the properties that are set
    pub fn iter(&self) -> impl Iterator<Item = (Property, f32)> + '_ {
        Property::ALL
            .into_iter()
            .filter_map(move |p| self.get(p).map(|v| (p, v)))
    }

    /// Overlay `other` on top of `self`; values set in `other` win
    pub fn merge(&mut self, other: &PropertyMap) {
        for (property, value) in other.iter() {
            self.set(property, value);
        }
    }
}
