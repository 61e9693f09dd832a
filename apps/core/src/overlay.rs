//! Overlay objects and the generational arena that owns them.
//!
//! A surface never hands out references into its overlay storage. Callers get
//! an [`OverlayId`] instead, and a removed id stays dead even if its slot is
//! reused, so replacing a marker is an id swap rather than lifetime tracking.

use crate::geo::{Bounds, Coordinate};

/// Stable handle to an overlay stored in an [`OverlayArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverlayId {
    index: u32,
    generation: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerIcon {
    Ambulance,
    Hospital,
}

impl MarkerIcon {
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Ambulance => "🚑",
            Self::Hospital => "🏥",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub position: Coordinate,
    pub icon: MarkerIcon,
    pub label: String,
    pub popup: Option<String>,
}

impl Marker {
    /// The reporting party's position.
    pub fn ambulance(position: Coordinate) -> Self {
        Self {
            position,
            icon: MarkerIcon::Ambulance,
            label: "Ambulance Location".to_string(),
            popup: Some("Ambulance Location".to_string()),
        }
    }

    pub fn hospital(position: Coordinate, name: &str, address: &str) -> Self {
        Self {
            position,
            icon: MarkerIcon::Hospital,
            label: name.to_string(),
            popup: Some(format!("{name}\n{address}")),
        }
    }
}

/// Stroke settings for a polyline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub color: (u8, u8, u8),
    pub weight: u8,
    pub opacity: f32,
}

impl LineStyle {
    pub const ROUTE: Self = Self {
        color: (0xff, 0x6b, 0x6b),
        weight: 4,
        opacity: 0.8,
    };
}

#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    pub points: Vec<Coordinate>,
    pub style: LineStyle,
}

impl Polyline {
    pub fn route(points: Vec<Coordinate>) -> Self {
        Self {
            points,
            style: LineStyle::ROUTE,
        }
    }

    /// Consecutive point pairs, one per drawn segment.
    pub fn segments(&self) -> impl Iterator<Item = (Coordinate, Coordinate)> + '_ {
        self.points.windows(2).map(|pair| (pair[0], pair[1]))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Overlay {
    Marker(Marker),
    Polyline(Polyline),
}

#[derive(Debug, Default)]
struct Slot {
    generation: u32,
    overlay: Option<Overlay>,
}

/// Slot storage with generation-checked ids and free-list reuse.
#[derive(Debug, Default)]
pub struct OverlayArena {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
}

impl OverlayArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, overlay: Overlay) -> OverlayId {
        self.live += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.overlay = Some(overlay);
            return OverlayId {
                index,
                generation: slot.generation,
            };
        }

        let index = u32::try_from(self.slots.len()).unwrap_or(u32::MAX);
        self.slots.push(Slot {
            generation: 0,
            overlay: Some(overlay),
        });
        OverlayId {
            index,
            generation: 0,
        }
    }

    /// Removes the overlay behind `id`. Stale or unknown ids return `None`.
    pub fn remove(&mut self, id: OverlayId) -> Option<Overlay> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        let overlay = slot.overlay.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.live -= 1;
        Some(overlay)
    }

    pub fn get(&self, id: OverlayId) -> Option<&Overlay> {
        let slot = self.slots.get(id.index as usize)?;
        if slot.generation == id.generation {
            slot.overlay.as_ref()
        } else {
            None
        }
    }

    pub const fn len(&self) -> usize {
        self.live
    }

    pub const fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (OverlayId, &Overlay)> + '_ {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            let overlay = slot.overlay.as_ref()?;
            let index = u32::try_from(index).ok()?;
            Some((
                OverlayId {
                    index,
                    generation: slot.generation,
                },
                overlay,
            ))
        })
    }

    pub fn markers(&self) -> impl Iterator<Item = &Marker> + '_ {
        self.iter().filter_map(|(_, overlay)| match overlay {
            Overlay::Marker(marker) => Some(marker),
            Overlay::Polyline(_) => None,
        })
    }

    pub fn polylines(&self) -> impl Iterator<Item = &Polyline> + '_ {
        self.iter().filter_map(|(_, overlay)| match overlay {
            Overlay::Polyline(line) => Some(line),
            Overlay::Marker(_) => None,
        })
    }
}

/// A placed marker: its id on the surface and where it was put.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerHandle {
    pub id: OverlayId,
    pub position: Coordinate,
}

/// A placed polyline and the region it covers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolylineHandle {
    pub id: OverlayId,
    pub bounds: Bounds,
}

/// The overlays this client owns. At most one of each kind is ever live.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OverlaySet {
    pub origin: Option<MarkerHandle>,
    pub destination: Option<MarkerHandle>,
    pub route: Option<PolylineHandle>,
}
