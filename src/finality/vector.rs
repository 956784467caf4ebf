use std::fmt;

type Count = i32;

/// Token counts per slot. Slot 0 is the abstract start resource, slot `i`
/// belongs to transition `i - 1`.
///
/// Equality and hashing are element-wise, so equal markings collide as map
/// keys regardless of where they were built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IntVector {
    elements: Vec<Count>,
}

impl IntVector {
    pub fn zeroed(len: usize) -> Self {
        IntVector {
            elements: vec![0; len],
        }
    }

    /// One token on the start resource, nothing on any transition.
    pub fn initial(transition_count: usize) -> Self {
        let mut vector = IntVector::zeroed(transition_count + 1);
        vector.elements[0] = 1;
        vector
    }

    // only used while a generator is put together
    pub(crate) fn set(&mut self, idx: usize, value: Count) {
        self.elements[idx] = value;
    }

    pub fn add(&self, other: &IntVector) -> IntVector {
        assert_eq!(self.elements.len(), other.elements.len());
        IntVector {
            elements: self
                .elements
                .iter()
                .zip(other.elements.iter())
                .map(|(a, b)| a + b)
                .collect(),
        }
    }

    pub fn has_negative(&self) -> bool {
        self.elements.iter().any(|&e| e < 0)
    }

    pub fn is_zero(&self) -> bool {
        self.elements.iter().all(|&e| e == 0)
    }

    pub fn has_positive(&self) -> bool {
        self.elements.iter().any(|&e| e > 0)
    }

    /// Transition slots (`i >= 1`) still holding a token.
    pub fn positive_slots(&self) -> impl Iterator<Item = usize> + '_ {
        self.elements
            .iter()
            .enumerate()
            .skip(1)
            .filter(|&(_, &e)| e > 0)
            .map(|(i, _)| i)
    }

    pub fn get(&self, idx: usize) -> Count {
        self.elements[idx]
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn elements(&self) -> &[Count] {
        &self.elements
    }
}

impl From<Vec<Count>> for IntVector {
    fn from(elements: Vec<Count>) -> Self {
        IntVector { elements }
    }
}

impl fmt::Display for IntVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, e) in self.elements.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", e)?;
        }
        write!(f, "]")
    }
}
