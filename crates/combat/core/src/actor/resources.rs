//! Resource pools (health, mana, stamina).
//!
//! Every mutation goes through [`ResourceMeter`], which clamps the current
//! value to `[0, maximum]`. Out-of-range inputs (negative amounts, NaN) are
//! clamped rather than propagated.

/// Enum representing individual resource types.
///
/// Used in effects and costs to reference specific resources.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ResourceKind {
    /// Health points.
    Health,
    /// Magic points.
    Mana,
    /// Physical endurance.
    Stamina,
}

/// A clamped resource meter.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    current: f64,
    maximum: f64,
}

impl ResourceMeter {
    /// Creates a meter, clamping `current` into `[0, maximum]`.
    pub fn new(current: f64, maximum: f64) -> Self {
        let maximum = sanitize(maximum);
        Self {
            current: sanitize(current).min(maximum),
            maximum,
        }
    }

    /// Creates a full meter.
    pub fn full(maximum: f64) -> Self {
        Self::new(maximum, maximum)
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn maximum(&self) -> f64 {
        self.maximum
    }

    /// Current value as a fraction of the maximum (0.0 when the maximum is 0).
    pub fn fraction(&self) -> f64 {
        if self.maximum <= 0.0 {
            0.0
        } else {
            self.current / self.maximum
        }
    }

    pub fn is_empty(&self) -> bool {
        self.current <= 0.0
    }

    pub fn is_full(&self) -> bool {
        self.current >= self.maximum
    }

    /// Sets the current value, clamped.
    pub fn set_current(&mut self, value: f64) {
        self.current = sanitize(value).min(self.maximum);
    }

    /// Removes up to `amount`; returns what was actually removed.
    pub fn drain(&mut self, amount: f64) -> f64 {
        let amount = sanitize(amount).min(self.current);
        self.current -= amount;
        amount
    }

    /// Adds up to `amount`; returns what was actually added.
    pub fn restore(&mut self, amount: f64) -> f64 {
        let amount = sanitize(amount).min(self.maximum - self.current);
        self.current += amount;
        amount
    }

    /// Changes the maximum and clamps the current value.
    ///
    /// A meter that was full before the change stays full, so freshly
    /// spawned actors start at their new maximum.
    pub fn rescale_maximum(&mut self, maximum: f64) {
        let was_full = self.is_full();
        self.maximum = sanitize(maximum);
        if was_full {
            self.current = self.maximum;
        } else {
            self.current = self.current.min(self.maximum);
        }
    }
}

/// The three resource pools of an actor.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Resources {
    pub health: ResourceMeter,
    pub mana: ResourceMeter,
    pub stamina: ResourceMeter,
}

impl Resources {
    /// Creates full pools with the given maxima.
    pub fn new(health: f64, mana: f64, stamina: f64) -> Self {
        Self {
            health: ResourceMeter::full(health),
            mana: ResourceMeter::full(mana),
            stamina: ResourceMeter::full(stamina),
        }
    }

    pub fn get(&self, kind: ResourceKind) -> &ResourceMeter {
        match kind {
            ResourceKind::Health => &self.health,
            ResourceKind::Mana => &self.mana,
            ResourceKind::Stamina => &self.stamina,
        }
    }

    pub fn get_mut(&mut self, kind: ResourceKind) -> &mut ResourceMeter {
        match kind {
            ResourceKind::Health => &mut self.health,
            ResourceKind::Mana => &mut self.mana,
            ResourceKind::Stamina => &mut self.stamina,
        }
    }
}

#[inline]
fn sanitize(value: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value.max(0.0) }
}
