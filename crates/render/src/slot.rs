use bytemuck::Pod;

/// The single shared constant slot.
///
/// There is exactly one of these per frame pipeline; every draw fully
/// overwrites it immediately before consuming it. The contract is
/// write-then-draw: the staged value belongs to the next draw only, and
/// a later write invalidates it for everything else. This holds because
/// the whole pipeline is single-threaded: there is one writer and it is
/// also the reader.
#[derive(Debug, Clone, Copy)]
pub struct ConstantSlot<T: Pod> {
    value: T,
    generation: u64,
}

impl<T: Pod + Default> Default for ConstantSlot<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Pod> ConstantSlot<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            generation: 0,
        }
    }

    /// Overwrite the whole slot with one draw's state.
    pub fn write(&mut self, value: T) {
        self.value = value;
        self.generation += 1;
    }

    /// The staged value, valid for the next draw only.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// The staged value as bytes, ready for upload.
    pub fn bytes(&self) -> &[u8] {
        bytemuck::bytes_of(&self.value)
    }

    /// How many writes the slot has seen. One draw per generation means
    /// no draw ever reads another draw's state.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Default, bytemuck::Pod, bytemuck::Zeroable)]
    #[repr(C)]
    struct Block {
        world: [f32; 4],
        flag: u32,
        _pad: [u32; 3],
    }

    #[test]
    fn write_replaces_the_whole_value() {
        let mut slot = ConstantSlot::<Block>::default();
        slot.write(Block {
            world: [1.0, 2.0, 3.0, 4.0],
            flag: 1,
            _pad: [0; 3],
        });
        assert_eq!(slot.value().world, [1.0, 2.0, 3.0, 4.0]);

        slot.write(Block::default());
        assert_eq!(slot.value().flag, 0);
    }

    #[test]
    fn one_generation_per_write() {
        let mut slot = ConstantSlot::<Block>::default();
        assert_eq!(slot.generation(), 0);
        for i in 1..=5 {
            slot.write(Block::default());
            assert_eq!(slot.generation(), i);
        }
    }

    #[test]
    fn bytes_reflect_the_latest_write() {
        let mut slot = ConstantSlot::<Block>::default();
        let block = Block {
            world: [9.0, 0.0, 0.0, 0.0],
            flag: 1,
            _pad: [0; 3],
        };
        slot.write(block);
        assert_eq!(slot.bytes(), bytemuck::bytes_of(&block));
    }
}
