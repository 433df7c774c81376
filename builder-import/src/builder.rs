//! The recursive reconciliation of JSON against type definitions.

use crate::error::{Expected, ImportError, ImportResult, JsonKind};
use crate::instance::{instances, structured_payload, unwrap_all};
use builder_model::{
    META_KEY, ModelAttribute, ModelType, Node, NodeValue, RootNode, Scalar, StructuredType,
    TypeDefinition,
};
use builder_registry::TypeRegistry;
use builder_types::IdGenerator;
use futures::future::BoxFuture;
use serde_json::{Map, Value};
use tracing::{debug, info, trace};

/// Builds typed node trees from JSON documents.
///
/// Holds no state between imports beyond what the registry caches, so one
/// builder can serve any number of concurrent imports.
pub struct NodeBuilder<R, G> {
    registry: R,
    ids: G,
}

impl<R: TypeRegistry, G: IdGenerator> NodeBuilder<R, G> {
    pub fn new(registry: R, ids: G) -> Self {
        Self { registry, ids }
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Imports `json` as an instance of `ty`.
    ///
    /// Children follow `ty`'s attribute declaration order; attributes absent
    /// from the document are omitted. Fails without a partial result if any
    /// nested type cannot be resolved or any instance has the wrong shape.
    pub async fn import(&self, json: &Value, ty: &StructuredType) -> ImportResult<RootNode> {
        let object = json.as_object().ok_or(ImportError::RootNotObject {
            found: JsonKind::of(json),
        })?;

        let def = self
            .registry
            .resolve(ty)
            .await
            .map_err(|source| ImportError::RootUnresolved {
                ty: ty.key(),
                source,
            })?;

        let children = self.build_children(object, &def, "").await?;
        let root = RootNode::new(ty.clone(), children);

        info!(
            type_key = %ty.key(),
            nodes = root.node_count(),
            "Imported JSON document"
        );
        Ok(root)
    }

    /// Reconciles one attribute's raw JSON value into nodes.
    ///
    /// Scalar attributes always yield exactly one node (or none when there
    /// are no instances). Structured attributes yield one node per instance.
    pub async fn reconcile(&self, raw: &Value, attribute: &ModelAttribute) -> ImportResult<Vec<Node>> {
        self.reconcile_at(raw, attribute, &attribute.name).await
    }

    /// Applies attribute reconciliation to every attribute of `def` found in
    /// `object`.
    fn build_children<'a>(
        &'a self,
        object: &'a Map<String, Value>,
        def: &'a TypeDefinition,
        path: &'a str,
    ) -> BoxFuture<'a, ImportResult<Vec<Node>>> {
        Box::pin(async move {
            for key in object.keys() {
                if key != META_KEY && def.attribute(key).is_none() {
                    trace!(type_key = %def.key(), key = %key, "Skipping unknown field");
                }
            }

            let mut children = Vec::new();
            for attribute in &def.attributes {
                if attribute.is_meta() {
                    continue;
                }
                let Some(raw) = object.get(&attribute.name) else {
                    continue;
                };
                let child_path = join_path(path, &attribute.name);
                children.extend(self.reconcile_at(raw, attribute, &child_path).await?);
            }
            Ok(children)
        })
    }

    async fn reconcile_at(
        &self,
        raw: &Value,
        attribute: &ModelAttribute,
        path: &str,
    ) -> ImportResult<Vec<Node>> {
        let instances = instances(raw);
        match &attribute.ty {
            ModelType::BasicType(_) | ModelType::EnumType(_) => {
                Ok(self.collapse(&instances, attribute, path)?.into_iter().collect())
            }
            ModelType::StructuredType(ty) => self.fan_out(&instances, attribute, ty, path).await,
        }
    }

    /// One node holding every scalar instance, or `None` if there are none.
    fn collapse(
        &self,
        instances: &[&Value],
        attribute: &ModelAttribute,
        path: &str,
    ) -> ImportResult<Option<Node>> {
        let mut scalars = Vec::with_capacity(instances.len());
        for instance in instances {
            let payload = unwrap_all(instance);
            if payload.is_null() {
                continue;
            }
            let scalar = Scalar::from_json(payload).ok_or_else(|| ImportError::MalformedInstance {
                path: path.to_string(),
                expected: Expected::Scalar,
                found: JsonKind::of(payload),
            })?;
            scalars.push(scalar);
        }

        Ok(NodeValue::collapse(scalars)
            .map(|value| Node::leaf(self.ids.next(), attribute.clone(), value)))
    }

    /// One node per structured instance, each with its own subtree.
    async fn fan_out(
        &self,
        instances: &[&Value],
        attribute: &ModelAttribute,
        ty: &StructuredType,
        path: &str,
    ) -> ImportResult<Vec<Node>> {
        if instances.is_empty() {
            return Ok(Vec::new());
        }

        let def = self
            .registry
            .resolve(ty)
            .await
            .map_err(|source| ImportError::UnresolvedType {
                path: path.to_string(),
                ty: ty.key(),
                source,
            })?;

        debug!(path = %path, type_key = %def.key(), instances = instances.len(), "Building structured instances");

        let mut nodes = Vec::with_capacity(instances.len());
        for instance in instances {
            let payload = structured_payload(instance, &def);
            if payload.is_null() {
                continue;
            }
            let object = payload.as_object().ok_or_else(|| ImportError::MalformedInstance {
                path: path.to_string(),
                expected: Expected::Object,
                found: JsonKind::of(payload),
            })?;

            let id = self.ids.next();
            let children = self.build_children(object, &def, path).await?;
            nodes.push(Node::branch(id, attribute.clone(), children));
        }
        Ok(nodes)
    }
}

fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}.{name}")
    }
}
