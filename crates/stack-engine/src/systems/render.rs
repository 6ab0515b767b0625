use crate::components::entity::Entity;
use crate::components::shape::Color;
use crate::renderer::instance::{RectInstance, RenderBuffer};

/// Rebuild the render buffer from a set of entities.
/// Entities keep scene order so later spawns draw on top.
/// Inactive entities and entities without a rect are skipped; at most
/// `max_instances` rects are written.
pub fn build_render_buffer<'a>(
    entities: impl Iterator<Item = &'a Entity>,
    buffer: &mut RenderBuffer,
    max_instances: usize,
) {
    buffer.clear();

    for entity in entities.filter(|e| e.active) {
        let Some(rect) = entity.rect else { continue };
        if buffer.instances.len() >= max_instances {
            log::warn!("render buffer full, dropping entity {:?}", entity.id);
            break;
        }

        let center = entity.center();
        let fill = entity.color.unwrap_or_default();
        let (outline_width, stroke) = entity
            .outline
            .map(|o| (o.width, o.color))
            .unwrap_or((0.0, Color::BLACK));

        buffer.push(RectInstance {
            x: center.x,
            y: center.y,
            width: rect.width,
            height: rect.height,
            rotation: entity.rotation,
            fill_r: fill.r,
            fill_g: fill.g,
            fill_b: fill.b,
            outline_width,
            outline_r: stroke.r,
            outline_g: stroke.g,
            outline_b: stroke.b,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::EntityId;
    use crate::components::shape::{Anchor, Outline};
    use glam::Vec2;

    #[test]
    fn rects_are_written_at_their_centre() {
        let entities = vec![
            Entity::new(EntityId(1))
                .with_pos(Vec2::new(150.0, 550.0))
                .with_anchor(Anchor::Bot)
                .with_rect(50.0, 250.0)
                .with_color(Color::rgb(150.0, 150.0, 150.0)),
            Entity::new(EntityId(2))
                .with_pos(Vec2::new(150.0, 550.0))
                .with_anchor(Anchor::Bot)
                .with_rect(150.0, 40.0)
                .with_color(Color::RED)
                .with_outline(Outline::new(2.0, Color::CYAN)),
        ];

        let mut buffer = RenderBuffer::default();
        build_render_buffer(entities.iter(), &mut buffer, 16);

        assert_eq!(buffer.instance_count(), 2);
        let tower = buffer.instances[0];
        assert_eq!((tower.x, tower.y), (150.0, 425.0));
        assert_eq!(tower.outline_width, 0.0);
        let ring = buffer.instances[1];
        assert_eq!((ring.x, ring.y), (150.0, 530.0));
        assert_eq!(ring.outline_width, 2.0);
        assert_eq!(ring.outline_g, 255.0);
    }

    #[test]
    fn shapeless_and_inactive_entities_are_skipped() {
        let mut hidden = Entity::new(EntityId(1)).with_rect(10.0, 10.0);
        hidden.active = false;
        let entities = vec![hidden, Entity::new(EntityId(2))];

        let mut buffer = RenderBuffer::default();
        build_render_buffer(entities.iter(), &mut buffer, 16);
        assert_eq!(buffer.instance_count(), 0);
    }

    #[test]
    fn buffer_is_capped() {
        let entities: Vec<Entity> = (1..=5)
            .map(|i| Entity::new(EntityId(i)).with_rect(10.0, 10.0))
            .collect();
        let mut buffer = RenderBuffer::default();
        build_render_buffer(entities.iter(), &mut buffer, 3);
        assert_eq!(buffer.instance_count(), 3);
    }
}
