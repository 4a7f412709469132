use std::collections::BTreeMap;

use crate::domain::{EndpointConfig, RequestDescriptor, RequestTemplate};

/// Per-attempt inputs that placeholders render from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttemptContext {
    /// 1-based lane number.
    pub lane: usize,
    /// 1-based attempt number within the lane.
    pub attempt: u32,
}

impl AttemptContext {
    #[must_use]
    pub const fn first(lane: usize) -> Self {
        Self { lane, attempt: 1 }
    }

    /// Substitutes `{{lane}}` and `{{attempt}}` in `input`.
    #[must_use]
    pub fn render(self, input: &str) -> String {
        render_template(input, &self.vars())
    }

    fn vars(self) -> BTreeMap<&'static str, String> {
        let mut vars = BTreeMap::new();
        vars.insert("lane", self.lane.to_string());
        vars.insert("attempt", self.attempt.to_string());
        vars
    }
}

/// Resolves a template against the endpoint settings.
///
/// Pure: the same config, template and context always produce the same
/// descriptor. Template headers override defaults with the same name.
#[must_use]
pub fn build_request(
    config: &EndpointConfig,
    template: &RequestTemplate,
    context: AttemptContext,
) -> RequestDescriptor {
    let vars = context.vars();

    let path = render_template(&template.path, &vars);
    let mut url = String::with_capacity(config.base_url().len().saturating_add(path.len()));
    url.push_str(config.base_url());
    url.push_str(&path);

    let mut headers = config.default_headers().clone();
    for (key, value) in &template.headers {
        headers.insert(render_template(key, &vars), render_template(value, &vars));
    }

    let body = template
        .method
        .sends_body()
        .then(|| render_template(&template.body, &vars));

    RequestDescriptor {
        method: template.method,
        url,
        headers,
        body,
        timeout: config.timeout(),
    }
}

pub(crate) fn render_template(input: &str, vars: &BTreeMap<&'static str, String>) -> String {
    let mut rest = input;
    let mut output = String::with_capacity(input.len());

    loop {
        let Some(start) = rest.find("{{") else {
            output.push_str(rest);
            break;
        };
        let (before, after_start) = rest.split_at(start);
        output.push_str(before);
        let Some(after) = after_start.strip_prefix("{{") else {
            output.push_str(after_start);
            break;
        };
        let Some(end) = after.find("}}") else {
            output.push_str("{{");
            output.push_str(after);
            break;
        };
        let (key_part, after_end) = after.split_at(end);
        if let Some(value) = vars.get(key_part.trim()) {
            output.push_str(value);
        } else {
            output.push_str("{{");
            output.push_str(key_part);
            output.push_str("}}");
        }
        rest = match after_end.strip_prefix("}}") {
            Some(remaining) => remaining,
            None => {
                output.push_str(after_end);
                break;
            }
        };
    }

    output
}
