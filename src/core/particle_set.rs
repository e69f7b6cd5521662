use crate::core::Particle;

/// Stable reference to a particle slot.
///
/// The generation changes whenever the slot is freed, so a handle to a
/// removed particle never resolves to whatever reuses the slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticleHandle {
    index: u32,
    generation: u32,
}

impl ParticleHandle {
    #[inline(always)]
    pub fn index(self) -> u32 {
        self.index
    }

    #[inline(always)]
    pub fn generation(self) -> u32 {
        self.generation
    }
}

#[derive(Clone, Debug, Default)]
struct Slot {
    generation: u32,
    particle: Option<Particle>,
}

/// Generational arena owning every particle of a system.
///
/// Iteration follows slot order, which only depends on the sequence of
/// inserts and removals.
#[derive(Clone, Debug, Default)]
pub struct ParticleSet {
    slots: Vec<Slot>,
    free: Vec<u32>,
    len: usize,
}

impl ParticleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn insert(&mut self, particle: Particle) -> ParticleHandle {
        self.len += 1;

        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.particle = Some(particle);
            return ParticleHandle {
                index,
                generation: slot.generation,
            };
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            particle: Some(particle),
        });
        ParticleHandle {
            index,
            generation: 0,
        }
    }

    pub fn contains(&self, handle: ParticleHandle) -> bool {
        self.get(handle).is_some()
    }

    pub fn get(&self, handle: ParticleHandle) -> Option<&Particle> {
        self.slots
            .get(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.particle.as_ref())
    }

    pub fn get_mut(&mut self, handle: ParticleHandle) -> Option<&mut Particle> {
        self.slots
            .get_mut(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.particle.as_mut())
    }

    /// Mutable access to two distinct particles at once.
    pub fn get2_mut(
        &mut self,
        a: ParticleHandle,
        b: ParticleHandle,
    ) -> Option<(&mut Particle, &mut Particle)> {
        if a.index == b.index || !self.contains(a) || !self.contains(b) {
            return None;
        }

        let (ia, ib) = (a.index as usize, b.index as usize);
        let (low, high) = (ia.min(ib), ia.max(ib));
        let (head, tail) = self.slots.split_at_mut(high);
        let low_particle = head[low].particle.as_mut()?;
        let high_particle = tail[0].particle.as_mut()?;

        if ia < ib {
            Some((low_particle, high_particle))
        } else {
            Some((high_particle, low_particle))
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (ParticleHandle, &Particle)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.particle.as_ref().map(|particle| {
                (
                    ParticleHandle {
                        index: index as u32,
                        generation: slot.generation,
                    },
                    particle,
                )
            })
        })
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (ParticleHandle, &mut Particle)> {
        self.slots.iter_mut().enumerate().filter_map(|(index, slot)| {
            let generation = slot.generation;
            slot.particle.as_mut().map(|particle| {
                (
                    ParticleHandle {
                        index: index as u32,
                        generation,
                    },
                    particle,
                )
            })
        })
    }

    pub fn handles(&self) -> Vec<ParticleHandle> {
        self.iter().map(|(handle, _)| handle).collect()
    }

    pub fn remove(&mut self, handle: ParticleHandle) -> Option<Particle> {
        if !self.contains(handle) {
            return None;
        }
        let particle = self.release(handle.index);
        self.free.push(handle.index);
        particle
    }

    /// Frees every slot whose particle is no longer alive.
    ///
    /// Returns the handles that just became stale, in slot order.
    pub fn remove_dead(&mut self) -> Vec<ParticleHandle> {
        let dead: Vec<ParticleHandle> = self
            .iter()
            .filter(|(_, particle)| !particle.is_alive())
            .map(|(handle, _)| handle)
            .collect();

        // Reverse so the lowest freed slot is reused first.
        for handle in dead.iter().rev() {
            self.release(handle.index);
            self.free.push(handle.index);
        }

        dead
    }

    pub fn clear(&mut self) {
        for index in 0..self.slots.len() as u32 {
            self.release(index);
        }
        self.free.clear();
        self.free.extend((0..self.slots.len() as u32).rev());
        self.len = 0;
    }

    fn release(&mut self, index: u32) -> Option<Particle> {
        let slot = &mut self.slots[index as usize];
        let particle = slot.particle.take();
        if particle.is_some() {
            slot.generation = slot.generation.wrapping_add(1);
            self.len -= 1;
        }
        particle
    }
}
