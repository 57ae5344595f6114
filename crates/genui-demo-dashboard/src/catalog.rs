#![forbid(unsafe_code)]

//! The dashboard component catalog.
//!
//! This defines the ONLY components the model can generate; it acts as the
//! guardrail that keeps arbitrary structure out of the tree. Props that end
//! in `Path` are binding references into the host's data document.

use genui_catalog::schema::{Field, Schema};
use genui_catalog::{ActionEntry, Catalog, ComponentEntry};

/// The sm/md/lg size scale shared by gaps, padding, and control sizes.
fn sizes() -> Schema {
    Schema::one_of(["sm", "md", "lg"])
}

/// Build the dashboard catalog.
#[must_use]
pub fn dashboard_catalog() -> Catalog {
    Catalog::builder()
        // Layout
        .component(
            ComponentEntry::new(
                "Card",
                Schema::object([
                    Field::optional("title", Schema::string()),
                    Field::optional("description", Schema::string()),
                    Field::optional("padding", sizes()),
                ]),
            )
            .accepts_children()
            .describe("A card container with optional title"),
        )
        .component(
            ComponentEntry::new(
                "Grid",
                Schema::object([
                    Field::optional("columns", Schema::integer_between(1.0, 4.0)),
                    Field::optional("gap", sizes()),
                ]),
            )
            .accepts_children()
            .describe("Grid layout with configurable columns"),
        )
        .component(
            ComponentEntry::new(
                "Stack",
                Schema::object([
                    Field::optional("direction", Schema::one_of(["horizontal", "vertical"])),
                    Field::optional("gap", sizes()),
                    Field::optional("align", Schema::one_of(["start", "center", "end", "stretch"])),
                ]),
            )
            .accepts_children()
            .describe("Flex stack for horizontal or vertical layouts"),
        )
        // Data display
        .component(
            ComponentEntry::new(
                "Metric",
                Schema::object([
                    Field::required("label", Schema::string()),
                    Field::required("valuePath", Schema::string()),
                    Field::optional("format", Schema::one_of(["number", "currency", "percent"])),
                    Field::optional("trend", Schema::one_of(["up", "down", "neutral"])),
                    Field::optional("trendValue", Schema::string()),
                ]),
            )
            .describe("Display a single metric with optional trend indicator"),
        )
        .component(
            ComponentEntry::new(
                "Chart",
                Schema::object([
                    Field::required("type", Schema::one_of(["bar", "line", "pie", "area"])),
                    Field::required("dataPath", Schema::string()),
                    Field::optional("title", Schema::string()),
                    Field::optional("height", Schema::number()),
                ]),
            )
            .describe("Display a chart from array data"),
        )
        .component(
            ComponentEntry::new(
                "Table",
                Schema::object([
                    Field::required("dataPath", Schema::string()),
                    Field::required(
                        "columns",
                        Schema::array(Schema::object([
                            Field::required("key", Schema::string()),
                            Field::required("label", Schema::string()),
                            Field::optional(
                                "format",
                                Schema::one_of(["text", "currency", "date", "badge"]),
                            ),
                        ])),
                    ),
                ]),
            )
            .describe("Display tabular data"),
        )
        .component(
            ComponentEntry::new(
                "List",
                Schema::object([
                    Field::required("dataPath", Schema::string()),
                    Field::optional("emptyMessage", Schema::string()),
                ]),
            )
            .accepts_children()
            .describe("Render a list from array data"),
        )
        // Interactive
        .component(
            ComponentEntry::new(
                "Button",
                Schema::object([
                    Field::required("label", Schema::string()),
                    Field::required("action", Schema::string()),
                    Field::optional("variant", Schema::one_of(["primary", "secondary", "danger", "ghost"])),
                    Field::optional("size", sizes()),
                    Field::optional("disabled", Schema::boolean()),
                ]),
            )
            .describe("Clickable button with action"),
        )
        .component(
            ComponentEntry::new(
                "Select",
                Schema::object([
                    Field::optional("label", Schema::string()),
                    Field::required("bindPath", Schema::string()),
                    Field::required(
                        "options",
                        Schema::array(Schema::object([
                            Field::required("value", Schema::string()),
                            Field::required("label", Schema::string()),
                        ])),
                    ),
                    Field::optional("placeholder", Schema::string()),
                ]),
            )
            .describe("Dropdown select input"),
        )
        .component(
            ComponentEntry::new(
                "DatePicker",
                Schema::object([
                    Field::optional("label", Schema::string()),
                    Field::required("bindPath", Schema::string()),
                    Field::optional("placeholder", Schema::string()),
                ]),
            )
            .describe("Date picker input"),
        )
        // Typography
        .component(
            ComponentEntry::new(
                "Heading",
                Schema::object([
                    Field::required("text", Schema::string()),
                    Field::optional("level", Schema::one_of(["h1", "h2", "h3", "h4"])),
                ]),
            )
            .describe("Section heading"),
        )
        .component(
            ComponentEntry::new(
                "Text",
                Schema::object([
                    Field::required("content", Schema::string()),
                    Field::optional("variant", Schema::one_of(["body", "caption", "label"])),
                    Field::optional(
                        "color",
                        Schema::one_of(["default", "muted", "success", "warning", "danger"]),
                    ),
                ]),
            )
            .describe("Text paragraph"),
        )
        // Status
        .component(
            ComponentEntry::new(
                "Badge",
                Schema::object([
                    Field::required("text", Schema::string()),
                    Field::optional(
                        "variant",
                        Schema::one_of(["default", "success", "warning", "danger", "info"]),
                    ),
                ]),
            )
            .describe("Small status badge"),
        )
        .component(
            ComponentEntry::new(
                "Alert",
                Schema::object([
                    Field::required("type", Schema::one_of(["info", "success", "warning", "error"])),
                    Field::required("title", Schema::string()),
                    Field::optional("message", Schema::string()),
                    Field::optional("dismissible", Schema::boolean()),
                ]),
            )
            .describe("Alert/notification banner"),
        )
        // Special
        .component(
            ComponentEntry::new(
                "Divider",
                Schema::object([Field::optional("label", Schema::string())]),
            )
            .describe("Visual divider"),
        )
        .component(
            ComponentEntry::new(
                "Empty",
                Schema::object([
                    Field::required("title", Schema::string()),
                    Field::optional("description", Schema::string()),
                    Field::optional("action", Schema::string()),
                    Field::optional("actionLabel", Schema::string()),
                ]),
            )
            .describe("Empty state placeholder"),
        )
        // Actions
        .action(ActionEntry::new("export_report").describe("Export the current dashboard to PDF"))
        .action(ActionEntry::new("refresh_data").describe("Refresh all metrics and charts"))
        .action(ActionEntry::new("view_details").describe("View detailed information"))
        .action(ActionEntry::new("apply_filter").describe("Apply the current filter settings"))
        .build()
}
