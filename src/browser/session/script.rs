//! JavaScript execution in the session's isolated world.

use serde_json::Value;
use tracing::trace;

use crate::browser::CdpElement;
use crate::driver::{ScriptArg, ScriptValue};
use crate::error::{Error, Result};
use crate::identifiers::ElementId;
use crate::protocol::{
    CallArgument, Command, DomCommand, ExceptionDetails, NodeDescription, PropertyDescriptor,
    RemoteObject, RuntimeCommand,
};

use super::CdpSession;

// ============================================================================
// CdpSession - Script Execution
// ============================================================================

impl CdpSession {
    /// Executes a function body with positional `arguments`.
    ///
    /// Node results become elements, arrays of nodes become element lists,
    /// and everything else is returned as JSON.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let title = session.execute_script("return document.title;", vec![]).await?;
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::ScriptError`] if the script throws.
    pub async fn execute_script(
        &self,
        body: &str,
        args: Vec<ScriptArg<CdpElement>>,
    ) -> Result<ScriptValue<CdpElement>> {
        let arguments = args
            .into_iter()
            .map(|arg| match arg {
                ScriptArg::Element(element) => CallArgument::object(element.object_id()),
                ScriptArg::Value(value) => CallArgument::value(value),
            })
            .collect();

        let object = self
            .call_function(format!("function () {{ {body} }}"), None, arguments, false)
            .await?;
        self.convert(object).await
    }

    /// Calls a function and returns the raw remote result.
    pub(crate) async fn call_function(
        &self,
        function_declaration: String,
        object_id: Option<String>,
        arguments: Vec<CallArgument>,
        return_by_value: bool,
    ) -> Result<RemoteObject> {
        let execution_context_id = object_id.is_none().then_some(self.inner.context_id);
        let command = Command::Runtime(RuntimeCommand::CallFunctionOn {
            function_declaration,
            execution_context_id,
            object_id,
            arguments,
            return_by_value,
            await_promise: true,
        });

        let mut result = self.send_command(command).await?;

        if let Some(details) = result.get("exceptionDetails") {
            let details: ExceptionDetails = serde_json::from_value(details.clone())?;
            return Err(Error::script_error(details.message()));
        }

        let object = result.get_mut("result").map(Value::take).unwrap_or_default();
        Ok(serde_json::from_value(object)?)
    }

    /// Converts a remote result into a typed value.
    async fn convert(&self, object: RemoteObject) -> Result<ScriptValue<CdpElement>> {
        if object.is_nullish() {
            return Ok(ScriptValue::Null);
        }
        if object.is_node() {
            return Ok(ScriptValue::Element(self.element_from(object).await?));
        }

        let Some(object_id) = object.object_id.clone() else {
            return Ok(object.value.map_or(ScriptValue::Null, ScriptValue::Value));
        };

        if object.is_array() {
            let items = self.array_items(&object_id).await?;
            if items.iter().all(RemoteObject::is_node) {
                self.release(object_id).await;
                let mut elements = Vec::with_capacity(items.len());
                for item in items {
                    elements.push(self.element_from(item).await?);
                }
                return Ok(ScriptValue::Elements(elements));
            }
            for item_id in items.into_iter().filter_map(|item| item.object_id) {
                self.release(item_id).await;
            }
        }

        let value = self.value_of(object_id.clone()).await;
        self.release(object_id).await;
        Ok(ScriptValue::Value(value?))
    }

    /// Indexed entries of a remote array, in index order.
    async fn array_items(&self, object_id: &str) -> Result<Vec<RemoteObject>> {
        let command = Command::Runtime(RuntimeCommand::GetProperties {
            object_id: object_id.to_string(),
            own_properties: true,
        });
        let result = self.send_command(command).await?;
        let properties: Vec<PropertyDescriptor> =
            serde_json::from_value(result.get("result").cloned().unwrap_or(Value::Null))?;

        let mut indexed: Vec<(usize, RemoteObject)> = properties
            .into_iter()
            .filter_map(|p| Some((p.name.parse::<usize>().ok()?, p.value?)))
            .collect();
        indexed.sort_by_key(|(index, _)| *index);

        trace!(object_id, len = indexed.len(), "Expanded remote array");
        Ok(indexed.into_iter().map(|(_, item)| item).collect())
    }

    /// Releases a remote object; failures are only logged.
    pub(crate) async fn release(&self, object_id: String) {
        let command = Command::Runtime(RuntimeCommand::ReleaseObject { object_id });
        if let Err(e) = self.send_command(command).await {
            trace!(error = %e, "Release of remote object failed");
        }
    }

    /// Serializes a remote object to JSON.
    async fn value_of(&self, object_id: String) -> Result<Value> {
        let object = self
            .call_function(
                "function () { return this; }".to_string(),
                Some(object_id),
                Vec::new(),
                true,
            )
            .await?;
        Ok(object.value.unwrap_or(Value::Null))
    }

    /// Wraps a node result as an element with a stable identity.
    async fn element_from(&self, object: RemoteObject) -> Result<CdpElement> {
        let object_id = object
            .object_id
            .ok_or_else(|| Error::protocol("Node result without objectId"))?;

        let command = Command::Dom(DomCommand::DescribeNode {
            object_id: object_id.clone(),
        });
        let mut result = self.send_command(command).await?;
        let node = result.get_mut("node").map(Value::take).unwrap_or_default();
        let node: NodeDescription = serde_json::from_value(node)?;

        Ok(CdpElement::new(
            ElementId::new(node.backend_node_id.to_string()),
            object_id,
            self.clone(),
        ))
    }
}
