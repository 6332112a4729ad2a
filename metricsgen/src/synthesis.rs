//! Synthesis: deterministic text production for one factory unit.
//!
//! Each eligible container becomes a standalone source unit: a sealed
//! factory class holding one field per metric, a constructor that builds the
//! shared tagged meter and populates every field in declaration order, and
//! one accessor per metric. The accessor delegates to the container's
//! factory function with the shared meter rather than returning the cached
//! field, so instance identity is whatever contract those functions keep.
//!
//! Emission is pure: handing the `(key, text)` pair to the build output is
//! the host's job.

use crate::discovery::{FactoryModel, MetricModel};

/// Metadata keys the emitted constructor stamps onto the shared meter.
const NAMESPACE_TAG: &str = "_microsoft_metrics_namespace";
const ACCOUNT_TAG: &str = "_microsoft_metrics_account";

const USING_DIRECTIVES: &str =
    "using System.Collections.Generic;\nusing System.Diagnostics.Metrics;\n";

/// One generated source unit, keyed for the host's output channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedUnit {
    /// `<ContainerName>Factory.g.cs`
    pub key: String,
    /// Complete standalone source text, UTF-8.
    pub text: String,
}

/// Emit the factory unit for one container model.
///
/// Never fails for a structurally valid model; malformed containers are
/// rejected in discovery before they get here.
pub fn synthesize(model: &FactoryModel) -> EmittedUnit {
    let fields: String = model.metrics.iter().map(metric_field).collect();
    let initializers: String = model
        .metrics
        .iter()
        .map(|metric| metric_initializer(model, metric))
        .collect();
    let accessors: String = model
        .metrics
        .iter()
        .map(|metric| metric_accessor(model, metric))
        .collect();

    let class = format!(
        r#"    internal sealed class {container}Factory
    {{
        private readonly Meter meter;
{fields}
        public {container}Factory()
        {{
            MeterOptions meterOptions = new MeterOptions("{container}");

            List<KeyValuePair<string, object>> tagList = meterOptions.Tags == null
                ? new List<KeyValuePair<string, object>>()
                : new List<KeyValuePair<string, object>>(meterOptions.Tags);
            tagList.Add(new KeyValuePair<string, object>("{NAMESPACE_TAG}", "{metrics_namespace}"));
            tagList.Add(new KeyValuePair<string, object>("{ACCOUNT_TAG}", "{metrics_account}"));
            meterOptions.Tags = tagList;

            this.meter = new Meter(meterOptions);
{initializers}        }}
{accessors}    }}
"#,
        container = model.container,
        metrics_namespace = model.metrics_namespace,
        metrics_account = model.metrics_account,
    );

    let text = match model.namespace.as_deref() {
        Some(namespace) => format!("{USING_DIRECTIVES}\nnamespace {namespace}\n{{\n{class}}}\n"),
        // Declared outside any namespace: no wrapper, no qualifier.
        None => format!("{USING_DIRECTIVES}\n{class}"),
    };

    EmittedUnit {
        key: format!("{}Factory.g.cs", model.container),
        text,
    }
}

fn metric_field(metric: &MetricModel) -> String {
    format!("\n        private {} {};\n", metric.result_type, metric.field)
}

fn metric_initializer(model: &FactoryModel, metric: &MetricModel) -> String {
    format!(
        "            this.{} = {}.{}(this.meter);\n",
        metric.field,
        qualified(model.namespace.as_deref(), &model.container),
        metric.method,
    )
}

fn metric_accessor(model: &FactoryModel, metric: &MetricModel) -> String {
    let namespace = model.namespace.as_deref();
    format!(
        "\n        public {result_type} {method}()\n        {{\n            return {container}.{method}(this.meter);\n        }}\n",
        result_type = qualified(namespace, &metric.result_type),
        container = qualified(namespace, &model.container),
        method = metric.method,
    )
}

fn qualified(namespace: Option<&str>, name: &str) -> String {
    match namespace {
        Some(namespace) => format!("{namespace}.{name}"),
        None => name.to_string(),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::discovery::MetricModel;
    use crate::marker::MetricKind;

    fn foo_model() -> FactoryModel {
        FactoryModel {
            container: "Foo".to_string(),
            namespace: Some("Ns".to_string()),
            metrics_namespace: "NsA".to_string(),
            metrics_account: "AcctB".to_string(),
            metrics: vec![MetricModel {
                method: "CreateBar".to_string(),
                result_type: "Bar".to_string(),
                field: "bar".to_string(),
                kind: MetricKind::Counter,
            }],
        }
    }

    #[test_log::test]
    fn emits_the_complete_unit() {
        let unit = synthesize(&foo_model());

        assert_eq!("FooFactory.g.cs", unit.key);
        let expected = r#"using System.Collections.Generic;
using System.Diagnostics.Metrics;

namespace Ns
{
    internal sealed class FooFactory
    {
        private readonly Meter meter;

        private Bar bar;

        public FooFactory()
        {
            MeterOptions meterOptions = new MeterOptions("Foo");

            List<KeyValuePair<string, object>> tagList = meterOptions.Tags == null
                ? new List<KeyValuePair<string, object>>()
                : new List<KeyValuePair<string, object>>(meterOptions.Tags);
            tagList.Add(new KeyValuePair<string, object>("_microsoft_metrics_namespace", "NsA"));
            tagList.Add(new KeyValuePair<string, object>("_microsoft_metrics_account", "AcctB"));
            meterOptions.Tags = tagList;

            this.meter = new Meter(meterOptions);
            this.bar = Ns.Foo.CreateBar(this.meter);
        }

        public Ns.Bar CreateBar()
        {
            return Ns.Foo.CreateBar(this.meter);
        }
    }
}
"#;
        assert_eq!(expected, unit.text);
    }

    #[test_log::test]
    fn tags_carry_the_marker_arguments_verbatim() {
        let mut model = foo_model();
        model.metrics_namespace = "Weird Namespace!".to_string();
        model.metrics_account = "acct-01".to_string();

        let unit = synthesize(&model);

        assert!(unit.text.contains(
            r#"tagList.Add(new KeyValuePair<string, object>("_microsoft_metrics_namespace", "Weird Namespace!"));"#
        ));
        assert!(unit.text.contains(
            r#"tagList.Add(new KeyValuePair<string, object>("_microsoft_metrics_account", "acct-01"));"#
        ));
    }

    #[test_log::test]
    fn empty_containers_emit_a_well_formed_unit() {
        let mut model = foo_model();
        model.metrics.clear();

        let unit = synthesize(&model);

        assert!(!unit.text.contains("private Bar"));
        assert!(!unit.text.contains("CreateBar"));
        assert!(unit.text.contains("this.meter = new Meter(meterOptions);"));
        assert!(unit.text.contains(r#""_microsoft_metrics_namespace", "NsA""#));
        assert!(unit.text.contains(r#""_microsoft_metrics_account", "AcctB""#));
    }

    #[test_log::test]
    fn fields_and_initializers_follow_declaration_order() {
        let mut model = foo_model();
        model.metrics.push(MetricModel {
            method: "CreateBaz".to_string(),
            result_type: "Baz".to_string(),
            field: "baz".to_string(),
            kind: MetricKind::Histogram,
        });

        let text = synthesize(&model).text;

        let bar_field = text.find("private Bar bar;").expect("bar field should be emitted");
        let baz_field = text.find("private Baz baz;").expect("baz field should be emitted");
        assert!(bar_field < baz_field);

        let bar_init = text
            .find("this.bar = Ns.Foo.CreateBar(this.meter);")
            .expect("bar initializer should be emitted");
        let baz_init = text
            .find("this.baz = Ns.Foo.CreateBaz(this.meter);")
            .expect("baz initializer should be emitted");
        assert!(bar_init < baz_init);
    }

    #[test_log::test]
    fn missing_namespace_drops_the_qualifier() {
        let mut model = foo_model();
        model.namespace = None;

        let unit = synthesize(&model);

        assert!(!unit.text.contains("namespace Ns"));
        assert!(unit.text.contains("\n    internal sealed class FooFactory\n"));
        assert!(unit.text.contains("this.bar = Foo.CreateBar(this.meter);"));
        assert!(unit.text.contains("public Bar CreateBar()"));
        assert!(unit.text.contains("return Foo.CreateBar(this.meter);"));
    }

    #[test_log::test]
    fn repeated_synthesis_is_byte_identical() {
        let model = foo_model();

        assert_eq!(synthesize(&model), synthesize(&model));
        assert_eq!(synthesize(&model).text, synthesize(&model).text);
    }
}
