//! Calorie estimation over the LLM gateway.

use crate::client::LlmClient;
use crate::error::ProviderError;
use serde_json::Value;

impl LlmClient {
    /// Ask the gateway to estimate calories for a single serving.
    ///
    /// The response is normalized here, once: the model may answer with a
    /// bare integer or a JSON object carrying `estimated_calories`, possibly
    /// decorated with `//` comments. Callers only ever see a `u32` count or
    /// a `ProviderError` — no response-shape sniffing downstream.
    pub async fn estimate_calories(
        &self,
        meal_name: &str,
        restrictions: &[String],
    ) -> Result<u32, ProviderError> {
        let prompt = calorie_prompt(meal_name, restrictions);
        let output = self.complete(&prompt, None, None).await?;
        parse_calorie_response(&output)
    }
}

fn calorie_prompt(meal_name: &str, restrictions: &[String]) -> String {
    let restrictions = if restrictions.is_empty() {
        "None".to_string()
    } else {
        restrictions.join(", ")
    };

    format!(
        "You are a professional nutritionist and culinary expert. \
         Estimate the caloric content of a SINGLE serving of the meal below. \
         First synthesize a plausible, standard recipe that strictly adheres \
         to the dietary restrictions, then total the calories of its \
         ingredients using standard nutritional values.\n\
         \n\
         Meal name: {meal_name}\n\
         Dietary restrictions: {restrictions}\n\
         \n\
         Respond in strict JSON:\n\
         {{\"estimated_calories\": <integer>}}"
    )
}

/// Normalize the model's answer into a calorie count.
pub(crate) fn parse_calorie_response(output: &str) -> Result<u32, ProviderError> {
    let cleaned = strip_line_comments(output);
    let value: Value = serde_json::from_str(cleaned.trim())
        .map_err(|e| ProviderError::Parse(format!("response is not JSON: {e}")))?;

    let calories = match &value {
        Value::Number(n) => n.as_u64(),
        Value::Object(map) => map.get("estimated_calories").and_then(Value::as_u64),
        _ => None,
    };

    calories
        .and_then(|c| u32::try_from(c).ok())
        .ok_or_else(|| {
            ProviderError::Parse("response carries no usable estimated_calories".to_string())
        })
}

/// Models sometimes annotate their JSON with `//` comments; drop them.
fn strip_line_comments(output: &str) -> String {
    output
        .lines()
        .map(|line| line.split("//").next().unwrap_or(""))
        .collect::<Vec<_>>()
        .join("\n")
}
