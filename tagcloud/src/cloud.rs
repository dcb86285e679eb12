use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::color::{ColorGenerator, ColorOptions, RandomColor, assign_color};
use crate::config::CloudConfig;
use crate::error::CloudError;
use crate::font_size::font_size;
use crate::handlers::{CloudHandlers, compose};
use crate::render::{CloudView, TagRenderer, default_tag_renderer};
use crate::seed::RandomSeed;
use crate::shuffle::order;
use crate::tag::{Tag, count_bounds, fingerprint};

/// A tag paired with the colour it will be shown in.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AnnotatedTag {
    pub tag: Tag,
    pub color: Option<String>,
}

/// The inputs whose change invalidates order and colours.
#[derive(Clone, Debug, PartialEq)]
struct TriggerSnapshot {
    color_options: ColorOptions,
    random_seed: Option<RandomSeed>,
    shuffle: bool,
    disable_random_color: bool,
    fingerprint: String,
}

impl TriggerSnapshot {
    fn capture(tags: &[Tag], config: &CloudConfig) -> Self {
        Self {
            color_options: config.color_options.clone(),
            random_seed: config.random_seed.clone(),
            shuffle: config.shuffle,
            disable_random_color: config.disable_random_color,
            fingerprint: fingerprint(tags),
        }
    }
}

/// Everything a render pass consumes.
#[derive(Clone)]
pub struct CloudProps {
    pub tags: Vec<Tag>,
    pub config: CloudConfig,
    pub renderer: TagRenderer,
    pub handlers: CloudHandlers,
}

impl CloudProps {
    pub fn new(tags: Vec<Tag>, config: CloudConfig) -> Self {
        Self {
            tags,
            config,
            renderer: default_tag_renderer(),
            handlers: CloudHandlers::new(),
        }
    }

    pub fn with_renderer(mut self, renderer: TagRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn with_handlers(mut self, handlers: CloudHandlers) -> Self {
        self.handlers = handlers;
        self
    }
}

/// One cloud instance and its render state.
///
/// The state starts stale and empty. [`TagCloud::refresh`] recomputes order
/// and colours only when a trigger input changed since the last computation,
/// so repeated renders with the same inputs show the same cloud.
pub struct TagCloud {
    generator: Box<dyn ColorGenerator>,
    data: Vec<AnnotatedTag>,
    snapshot: Option<TriggerSnapshot>,
}

impl Default for TagCloud {
    fn default() -> Self {
        Self::new()
    }
}

impl TagCloud {
    pub fn new() -> Self {
        Self::with_color_generator(RandomColor)
    }

    pub fn with_color_generator(generator: impl ColorGenerator + 'static) -> Self {
        Self {
            generator: Box::new(generator),
            data: Vec::new(),
            snapshot: None,
        }
    }

    pub fn is_fresh(&self) -> bool {
        self.snapshot.is_some()
    }

    pub fn data(&self) -> &[AnnotatedTag] {
        &self.data
    }

    /// Marks the state stale so the next refresh recomputes.
    pub fn invalidate(&mut self) {
        self.snapshot = None;
    }

    pub fn needs_refresh(&self, tags: &[Tag], config: &CloudConfig) -> bool {
        match &self.snapshot {
            Some(snapshot) => *snapshot != TriggerSnapshot::capture(tags, config),
            None => true,
        }
    }

    /// Reorders and recolours `tags` if a trigger input changed.
    /// Returns whether the state was recomputed.
    pub fn refresh(&mut self, tags: &[Tag], config: &CloudConfig) -> bool {
        let snapshot = TriggerSnapshot::capture(tags, config);
        if self.snapshot.as_ref() == Some(&snapshot) {
            trace!(tags = tags.len(), "render state unchanged");
            return false;
        }

        let generator = self.generator.as_ref();
        self.data = order(tags, config)
            .into_iter()
            .map(|tag| {
                let color = assign_color(&tag, config, generator);
                AnnotatedTag { tag, color }
            })
            .collect();
        self.snapshot = Some(snapshot);

        debug!(
            tags = self.data.len(),
            shuffle = config.shuffle,
            seeded = config.active_seed().is_some(),
            "recomputed render state"
        );
        true
    }

    /// Full render pass: refresh if needed, then size, render and wire
    /// handlers for every tag in render-state order.
    pub fn render(&mut self, props: &CloudProps) -> Result<CloudView, CloudError> {
        let config = &props.config;
        config.validate()?;
        validate_counts(&props.tags)?;
        self.refresh(&props.tags, config);

        let mut view = CloudView {
            container: config.container.clone(),
            class_name: config.class_name.clone(),
            attributes: config.attributes.clone(),
            children: Vec::with_capacity(self.data.len()),
        };

        let Some((min, max)) = count_bounds(self.data.iter().map(|annotated| &annotated.tag))
        else {
            return Ok(view);
        };

        for AnnotatedTag { tag, color } in &self.data {
            let size = font_size(tag.count, min, max, config.min_size, config.max_size);
            let element = (props.renderer)(tag, size, color.as_deref());
            view.children.push(compose(element, tag, &props.handlers)?);
        }

        Ok(view)
    }
}

fn validate_counts(tags: &[Tag]) -> Result<(), CloudError> {
    match tags
        .iter()
        .find(|tag| !tag.count.is_finite() || tag.count < 0.0)
    {
        Some(tag) => {
            warn!(tag = %tag.value, count = tag.count, "rejecting tag weight");
            Err(CloudError::InvalidCount {
                value: tag.value.clone(),
                count: tag.count,
            })
        }
        None => Ok(()),
    }
}
