//! Object pool: an arena of [Object]s addressed by sequential index or identifier.

use std::collections::BTreeMap;

use crate::{
    errors::PoolError,
    object::{DeviceElement, ElementType, Object},
};

/// Pool format version announced to the task controller.
pub const DEFAULT_POOL_VERSION: u8 = 3;

/// Ordered collection of pool objects. Parent and child links are held as
/// identifiers, never as references.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectPool {
    version: u8,
    objects: Vec<Object>,
    index_by_id: BTreeMap<u16, usize>,
}

impl Default for ObjectPool {
    fn default() -> Self {
        Self::new(DEFAULT_POOL_VERSION)
    }
}

impl ObjectPool {
    pub fn new(version: u8) -> Self {
        Self {
            version,
            objects: Vec::new(),
            index_by_id: BTreeMap::new(),
        }
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    /// Appends `object`. Fails if its identifier is already taken.
    pub fn add(&mut self, object: Object) -> Result<(), PoolError> {
        let id = object.id();
        if self.index_by_id.contains_key(&id) {
            return Err(PoolError::DuplicateObjectId(id));
        }

        self.index_by_id.insert(id, self.objects.len());
        self.objects.push(object);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn get_by_index(&self, index: usize) -> Option<&Object> {
        self.objects.get(index)
    }

    pub fn get_by_id(&self, id: u16) -> Option<&Object> {
        self.index_by_id.get(&id).map(|&index| &self.objects[index])
    }

    pub fn contains(&self, id: u16) -> bool {
        self.index_by_id.contains_key(&id)
    }

    /// Objects in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Object> {
        self.objects.iter()
    }

    pub fn element(&self, id: u16) -> Result<&DeviceElement, PoolError> {
        self.get_by_id(id)
            .ok_or(PoolError::UnknownObjectId(id))?
            .as_element()
            .ok_or(PoolError::NotAnElement(id))
    }

    fn element_mut(&mut self, id: u16) -> Result<&mut DeviceElement, PoolError> {
        let index = *self
            .index_by_id
            .get(&id)
            .ok_or(PoolError::UnknownObjectId(id))?;

        match &mut self.objects[index] {
            Object::DeviceElement(element) => Ok(element),
            _ => Err(PoolError::NotAnElement(id)),
        }
    }

    /// Appends `child_id` to the child list of element `element_id`.
    pub fn add_child(&mut self, element_id: u16, child_id: u16) -> Result<(), PoolError> {
        self.element_mut(element_id)?.add_child(child_id);
        Ok(())
    }

    /// All device elements, in insertion order.
    pub fn elements(&self) -> impl Iterator<Item = &DeviceElement> {
        self.objects.iter().filter_map(Object::as_element)
    }

    /// Number of elements of type [ElementType::Section].
    pub fn section_count(&self) -> usize {
        self.elements()
            .filter(|element| element.element_type == ElementType::Section)
            .count()
    }

    /// Checks that every parent and child reference resolves to an object in the pool.
    pub fn validate(&self) -> Result<(), PoolError> {
        for element in self.elements() {
            if !self.contains(element.parent_id) {
                return Err(PoolError::DanglingParent {
                    element: element.id,
                    parent: element.parent_id,
                });
            }

            if let Some(&child) = element.children.iter().find(|&&child| !self.contains(child)) {
                return Err(PoolError::DanglingChild {
                    element: element.id,
                    child,
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::object::{DeviceProperty, DeviceValuePresentation};

    use super::*;

    fn element(id: u16, parent_id: u16, element_type: ElementType) -> Object {
        Object::DeviceElement(DeviceElement {
            id,
            designator: format!("e{}", id),
            element_type,
            element_number: id,
            parent_id,
            children: vec![],
        })
    }

    fn property(id: u16) -> Object {
        Object::DeviceProperty(DeviceProperty {
            id,
            designator: "Offset X".to_string(),
            ddi: 134,
            value: 0,
            presentation_id: 0xFFFF,
        })
    }

    #[test]
    fn test_empty_pool() {
        let pool = ObjectPool::default();
        assert!(pool.is_empty());
        assert_eq!(pool.version(), 3);
        assert_eq!(pool.get_by_index(0), None);
        assert_eq!(pool.get_by_id(0), None);
    }

    #[test]
    fn test_lookup_by_index_and_id() {
        let mut pool = ObjectPool::default();
        pool.add(element(10, 10, ElementType::Device)).unwrap();
        pool.add(property(4)).unwrap();

        assert_eq!(pool.len(), 2);
        assert_eq!(pool.get_by_index(1).map(Object::id), Some(4));
        assert_eq!(pool.get_by_id(10).map(Object::id), Some(10));
    }

    #[test]
    fn test_duplicate_id_is_rejected() {
        let mut pool = ObjectPool::default();
        pool.add(property(4)).unwrap();

        assert_eq!(pool.add(property(4)), Err(PoolError::DuplicateObjectId(4)));
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn test_add_child() {
        let mut pool = ObjectPool::default();
        pool.add(element(1, 1, ElementType::Device)).unwrap();
        pool.add(property(2)).unwrap();
        pool.add(property(3)).unwrap();

        pool.add_child(1, 3).unwrap();
        pool.add_child(1, 2).unwrap();

        assert_eq!(pool.element(1).unwrap().children, vec![3, 2]);
    }

    #[test]
    fn test_add_child_to_non_element() {
        let mut pool = ObjectPool::default();
        pool.add(property(2)).unwrap();

        assert_eq!(pool.add_child(2, 3), Err(PoolError::NotAnElement(2)));
        assert_eq!(pool.add_child(9, 3), Err(PoolError::UnknownObjectId(9)));
    }

    #[test]
    fn test_section_count() {
        let mut pool = ObjectPool::default();
        pool.add(element(1, 1, ElementType::Device)).unwrap();
        pool.add(element(2, 1, ElementType::Section)).unwrap();
        pool.add(element(3, 1, ElementType::Section)).unwrap();
        pool.add(element(4, 1, ElementType::Bin)).unwrap();

        assert_eq!(pool.section_count(), 2);
    }

    #[test]
    fn test_validate_dangling_child() {
        let mut pool = ObjectPool::default();
        pool.add(element(1, 1, ElementType::Device)).unwrap();
        pool.add_child(1, 77).unwrap();

        assert_eq!(
            pool.validate(),
            Err(PoolError::DanglingChild { element: 1, child: 77 })
        );
    }

    #[test]
    fn test_validate_dangling_parent() {
        let mut pool = ObjectPool::default();
        pool.add(element(1, 5, ElementType::Function)).unwrap();

        assert_eq!(
            pool.validate(),
            Err(PoolError::DanglingParent { element: 1, parent: 5 })
        );
    }

    #[test]
    fn test_validate_ok() {
        let mut pool = ObjectPool::default();
        pool.add(element(1, 1, ElementType::Device)).unwrap();
        pool.add(Object::DeviceValuePresentation(DeviceValuePresentation {
            id: 2,
            designator: "mm".to_string(),
            offset: 0,
            scale: 1.0,
            decimal_digits: 0,
        }))
        .unwrap();
        pool.add_child(1, 2).unwrap();

        assert_eq!(pool.validate(), Ok(()));
    }
}
