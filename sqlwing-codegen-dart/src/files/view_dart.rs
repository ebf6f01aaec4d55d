//! Flutter list view and edit modal generator.

use std::path::{Path, PathBuf};

use sqlwing_codegen::{TypeMapper, builder::CodeBuilder, generation::ImportCollector};
use sqlwing_core::{GeneratedFile, NameVariant, to_title_words};
use sqlwing_schema::{Column, SqlEnum, TargetType, Table, find_enum};

use crate::{
    naming::{is_auth_user, related_model, without_id_suffix},
    type_mapper::DartTypeMapper,
};

/// `lib/views/<table>_view.dart`: a list of rows with refresh,
/// swipe-to-delete and an add/edit bottom sheet.
///
/// Only tables with an `id` column get a view; see [`ViewDart::is_renderable`].
pub struct ViewDart<'a> {
    table: &'a Table,
    enums: &'a [SqlEnum],
    project_name: &'a str,
}

/// How one column is edited in the modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormField<'a> {
    DatePicker,
    RelatedDropdown,
    EnumDropdown(&'a SqlEnum),
    Multiline,
    Text,
    Numeric,
}

/// A column with everything the view needs to know about it.
struct ViewColumn<'a> {
    column: &'a Column,
    related: Option<NameVariant>,
    sql_enum: Option<&'a SqlEnum>,
}

impl<'a> ViewColumn<'a> {
    fn new(column: &'a Column, enums: &'a [SqlEnum]) -> Self {
        let sql_enum = column
            .is_enum
            .then(|| find_enum(enums, &column.sql_type))
            .flatten();
        Self {
            column,
            related: related_model(column),
            sql_enum,
        }
    }

    fn camel(&self) -> &str {
        &self.column.column_name.camel
    }

    fn capitalized(&self) -> &str {
        &self.column.column_name.capitalized
    }

    fn snake(&self) -> &str {
        &self.column.column_name.original
    }

    fn nullable_type(&self) -> String {
        DartTypeMapper.map_nullable_type(self.column.target_type)
    }

    fn label(&self) -> String {
        to_title_words(self.snake())
    }

    /// Passed into the modal as `initial<Name>`.
    fn is_modal_property(&self) -> bool {
        !is_auth_user(self.column)
    }

    /// Tracked as `current<Name>` and updated by a dropdown.
    fn has_current_value(&self) -> bool {
        self.sql_enum.is_some() || self.related.is_some()
    }

    fn has_controller(&self) -> bool {
        !self.column.is_primary_key && !self.column.is_foreign_key
    }

    fn form_field(&self) -> Option<FormField<'a>> {
        if self.snake() == "id" || is_auth_user(self.column) {
            return None;
        }
        if let Some(sql_enum) = self.sql_enum {
            return Some(FormField::EnumDropdown(sql_enum));
        }
        if self.related.is_some() {
            return (self.column.target_type == TargetType::Integer)
                .then_some(FormField::RelatedDropdown);
        }
        if !self.has_controller() {
            return None;
        }
        match self.column.base_sql_type() {
            "date" => Some(FormField::DatePicker),
            "text" => Some(FormField::Multiline),
            "varchar" => Some(FormField::Text),
            "real" | "double" | "bigint" => Some(FormField::Numeric),
            _ => None,
        }
    }

    /// Argument passed to the model constructor on save.
    fn save_argument(&self, table_camel: &str) -> String {
        let camel = self.camel();
        let cap = self.capitalized();
        let bang = if self.column.is_not_null { "!" } else { "" };

        if self.snake() == "id" {
            return format!("{camel}: initial{cap},");
        }
        if is_auth_user(self.column) {
            return format!(
                "{camel}: ref.read({table_camel}Provider.notifier).getUserId(){bang},"
            );
        }
        if self.has_current_value() {
            return format!("{camel}: current{cap}{bang},");
        }
        if !self.has_controller() {
            return format!("{camel}: initial{cap}{bang},");
        }

        let parse = if self.column.is_not_null {
            "parse"
        } else {
            "tryParse"
        };
        match self.column.target_type {
            TargetType::Integer => format!("{camel}: int.{parse}({camel}Controller.text),"),
            TargetType::Float => format!("{camel}: double.{parse}({camel}Controller.text),"),
            TargetType::String | TargetType::Dynamic => {
                format!("{camel}: {camel}Controller.text,")
            }
        }
    }
}

impl<'a> ViewDart<'a> {
    pub fn new(table: &'a Table, enums: &'a [SqlEnum], project_name: &'a str) -> Self {
        Self {
            table,
            enums,
            project_name,
        }
    }

    /// Whether the table has the `id` column the view keys rows by.
    pub fn is_renderable(&self) -> bool {
        self.table.has_column("id")
    }

    fn columns(&self) -> Vec<ViewColumn<'a>> {
        self.table
            .columns
            .iter()
            .map(|c| ViewColumn::new(c, self.enums))
            .collect()
    }

    fn imports(&self, columns: &[ViewColumn<'_>]) -> ImportCollector {
        let snake = &self.table.name.original;
        let mut imports = ImportCollector::new();
        imports.add("package:flutter/material.dart");
        imports.add("package:flutter_hooks/flutter_hooks.dart");
        imports.add("package:hooks_riverpod/hooks_riverpod.dart");
        imports.add_package(self.project_name, &format!("models/{snake}_model.dart"));
        imports.add_package(self.project_name, &format!("providers/{snake}_provider.dart"));

        for related in columns.iter().filter_map(|c| c.related.as_ref()) {
            imports.add_package(
                self.project_name,
                &format!("providers/{}_provider.dart", related.original),
            );
        }
        for sql_enum in columns.iter().filter_map(|c| c.sql_enum) {
            imports.add_package(
                self.project_name,
                &format!("sql_enums_dart_classes/{}_class.dart", sql_enum.name.original),
            );
        }
        imports
    }

    fn render_view(&self, builder: CodeBuilder, columns: &[ViewColumn<'_>]) -> CodeBuilder {
        let snake = &self.table.name.original;
        let camel = &self.table.name.camel;
        let class = &self.table.name.capitalized;
        let title = to_title_words(snake);

        let edit_arguments: Vec<String> = columns
            .iter()
            .filter(|c| c.is_modal_property())
            .map(|c| format!("initial{}: value.{},", c.capitalized(), c.camel()))
            .collect();

        builder.block_with_close(
            &format!("class {class}View extends HookConsumerWidget {{"),
            "}",
            |b| {
                b.line(&format!("static const routeName = '/{snake}';"))
                    .blank()
                    .line(&format!("const {class}View({{super.key}});"))
                    .blank()
                    .line("@override")
                    .block_with_close(
                        "Widget build(BuildContext context, WidgetRef ref) {",
                        "}",
                        |b| {
                            b.line(&format!(
                                "final {camel}AsyncValue = ref.watch({camel}Provider);"
                            ))
                            .line(&format!(
                                "final {camel} = useState<List<{class}Model>>([]);"
                            ))
                            .blank()
                            .block_with_close(
                                "useEffect(() {",
                                &format!("}}, [{camel}AsyncValue]);"),
                                |b| {
                                    b.line(&format!(
                                        "{camel}.value = {camel}AsyncValue.maybeWhen("
                                    ))
                                    .indent()
                                    .line("data: (values) => values,")
                                    .line("orElse: () => [],")
                                    .dedent()
                                    .line(");")
                                    .line("return null;")
                                },
                            )
                            .blank()
                            .block_with_close("return Scaffold(", ");", |b| {
                                b.lines(&format!(
                                    r#"appBar: AppBar(
  title: const Text('{title}'),
  actions: [
    IconButton(
      icon: const Icon(Icons.refresh),
      onPressed: () {{
        // ignore: unused_result
        ref.refresh({camel}Provider.future);
      }},
    ),
  ],
),"#
                                ))
                                .block_with_close(&format!("body: {camel}AsyncValue.when("), "),", |b| {
                                    b.line("loading: () => const Center(child: CircularProgressIndicator()),")
                                        .line("error: (error, stack) => Center(child: Text('Error: $error')),")
                                        .block_with_close("data: (values) {", "},", |b| {
                                            b.block_with_close("return ListView.separated(", ");", |b| {
                                                b.line("separatorBuilder: (context, index) => const Divider(),")
                                                    .line(&format!("itemCount: {camel}.value.length + 1,"))
                                                    .block_with_close("itemBuilder: (context, index) {", "},", |b| {
                                                        self.render_list_item(b, &edit_arguments)
                                                    })
                                            })
                                        })
                                })
                                .lines(&format!(
                                    r#"floatingActionButton: FloatingActionButton(
  onPressed: () async {{
    await showModalBottomSheet<bool>(
      isScrollControlled: true,
      context: context,
      builder: (BuildContext context) {{
        return _{class}Modal(
          context: context,
        );
      }},
    );
  }},
  child: const Icon(Icons.add),
),"#
                                ))
                            })
                        },
                    )
            },
        )
    }

    fn render_list_item(&self, builder: CodeBuilder, edit_arguments: &[String]) -> CodeBuilder {
        let snake = &self.table.name.original;
        let camel = &self.table.name.camel;
        let class = &self.table.name.capitalized;

        builder
            .block_with_close(&format!("if (index == {camel}.value.length) {{"), "}", |b| {
                b.line("return const SizedBox(")
                    .indent()
                    .indent()
                    .line("height: 70, child: Center(child: Text('The End')));")
                    .dedent()
                    .dedent()
            })
            .line(&format!("final value = {camel}.value[index];"))
            .block_with_close("return Dismissible(", ");", |b| {
                b.lines(
                    r#"key: Key(value.id.toString()),
direction: DismissDirection.endToStart,
background: Container(
  color: Colors.red,
  alignment: Alignment.centerRight,
  padding: const EdgeInsets.symmetric(horizontal: 20.0),
  child: const Icon(Icons.delete, color: Colors.white),
),
confirmDismiss: (direction) async {
  bool? confirmDelete = await showDialog<bool>(
    context: context,
    builder: (BuildContext context) {
      return AlertDialog(
        title: const Text('Confirm Deletion'),
        content: const Text('Are you sure you want to delete this?'),
        actions: <Widget>[
          TextButton(
            child: const Text('Cancel'),
            onPressed: () {
              Navigator.of(context).pop(false);
            },
          ),
          TextButton(
            child: const Text('Delete'),
            onPressed: () {
              Navigator.of(context).pop(true);
            },
          ),
        ],
      );
    },
  );
  return confirmDelete;
},"#,
                )
                .block_with_close("onDismissed: (direction) async {", "},", |b| {
                    b.line(&format!(
                        "{camel}.value = List.from({camel}.value)..removeAt(index);"
                    ))
                    .line(&format!(
                        "await ref.read({camel}Provider.notifier).delete(value.id);"
                    ))
                })
                .block_with_close("child: ListTile(", "),", |b| {
                    b.line(&format!("title: const Text(\"{snake}\"),"))
                        .line("subtitle: Text(value.id.toString()),")
                        .block_with_close("onTap: () async {", "},", |b| {
                            b.block_with_close("await showModalBottomSheet<bool>(", ");", |b| {
                                b.line("isScrollControlled: true,")
                                    .line("context: context,")
                                    .block_with_close("builder: (BuildContext context) {", "},", |b| {
                                        b.block_with_close(&format!("return _{class}Modal("), ");", |b| {
                                            b.line("context: context,")
                                                .each(edit_arguments, |b, arg| b.line(arg))
                                        })
                                    })
                            })
                        })
                })
            })
    }

    fn render_modal(&self, builder: CodeBuilder, columns: &[ViewColumn<'_>]) -> CodeBuilder {
        let camel = &self.table.name.camel;
        let class = &self.table.name.capitalized;
        let properties: Vec<&ViewColumn<'_>> =
            columns.iter().filter(|c| c.is_modal_property()).collect();

        builder.block_with_close(
            &format!("class _{class}Modal extends ConsumerWidget {{"),
            "}",
            |b| {
                b.line("final BuildContext context;")
                    .each(&properties, |b, c| {
                        b.line(&format!("final {} initial{};", c.nullable_type(), c.capitalized()))
                    })
                    .blank()
                    .block_with_close(&format!("const _{class}Modal({{"), "});", |b| {
                        b.line("required this.context,").each(&properties, |b, c| {
                            b.line(&format!("this.initial{},", c.capitalized()))
                        })
                    })
                    .blank()
                    .line("@override")
                    .block_with_close(
                        "Widget build(BuildContext context, WidgetRef ref) {",
                        "}",
                        |b| {
                            let b = b.line("final isEdit = initialId != null;");
                            let b = render_modal_state(b, columns);
                            self.render_modal_body(b, camel, class, columns)
                        },
                    )
            },
        )
    }

    fn render_modal_body(
        &self,
        builder: CodeBuilder,
        camel: &str,
        class: &str,
        columns: &[ViewColumn<'_>],
    ) -> CodeBuilder {
        builder.block_with_close("return Padding(", ");", |b| {
            b.line("padding: const EdgeInsets.all(16.0),")
                .block_with_close("child: FractionallySizedBox(", "),", |b| {
                    b.line("heightFactor: 0.9,")
                        .block_with_close("child: Column(", "),", |b| {
                            b.block_with_close("children: [", "],", |b| {
                                let b = b
                                    .line("Text(isEdit ? 'Edit' : 'Add', style: Theme.of(context).textTheme.titleLarge),")
                                    .line("const SizedBox(height: 8),")
                                    .block_with_close("Expanded(", "),", |b| {
                                        b.block_with_close("child: SingleChildScrollView(", "),", |b| {
                                            b.block_with_close("child: Column(", "),", |b| {
                                                b.line("mainAxisSize: MainAxisSize.min,")
                                                    .block_with_close("children: [", "],", |b| {
                                                        columns.iter().fold(b, |b, c| render_form_field(b, c))
                                                    })
                                            })
                                        })
                                    })
                                    .line("const SizedBox(height: 16),");
                                render_modal_actions(b, camel, class, columns)
                                    .line("const SizedBox(height: 16),")
                            })
                        })
                })
        })
    }
}

/// Local `current<Name>` values, text controllers and related-row watchers.
fn render_modal_state(builder: CodeBuilder, columns: &[ViewColumn<'_>]) -> CodeBuilder {
    let current: Vec<String> = columns
        .iter()
        .filter(|c| c.has_current_value())
        .map(|c| {
            format!(
                "{} current{cap} = initial{cap};",
                c.nullable_type(),
                cap = c.capitalized()
            )
        })
        .collect();

    let controllers: Vec<String> = columns
        .iter()
        .filter(|c| c.has_controller())
        .map(|c| {
            let text = if c.column.target_type == TargetType::String {
                format!("initial{}", c.capitalized())
            } else {
                format!("initial{}?.toString()", c.capitalized())
            };
            format!(
                "final TextEditingController {}Controller = TextEditingController(text: {text});",
                c.camel()
            )
        })
        .collect();

    let watchers: Vec<String> = columns
        .iter()
        .filter_map(|c| {
            c.related.as_ref().map(|related| {
                format!(
                    "final {}AsyncValue = ref.watch({}Provider);",
                    c.camel(),
                    related.camel
                )
            })
        })
        .collect();

    [current, controllers, watchers]
        .into_iter()
        .filter(|section| !section.is_empty())
        .fold(builder, |b, section| {
            b.each(&section, |b, line| b.line(line)).blank()
        })
}

fn render_form_field(builder: CodeBuilder, column: &ViewColumn<'_>) -> CodeBuilder {
    let Some(field) = column.form_field() else {
        return builder;
    };
    let camel = column.camel();
    let cap = column.capitalized();
    let label = column.label();

    match field {
        FormField::DatePicker => builder.lines(&format!(
            r#"TextFormField(
  controller: {camel}Controller,
  decoration: const InputDecoration(labelText: '{label}'),
  readOnly: true,
  onTap: () async {{
    DateTime? pickedDate = await showDatePicker(
      context: context,
      initialDate: DateTime.tryParse(initial{cap} ?? "") ?? DateTime.now(),
      firstDate: DateTime(1900),
      lastDate: DateTime(2200),
    );
    if (pickedDate != null) {{
      {camel}Controller.text = pickedDate.toIso8601String();
    }}
  }},
),"#
        )),
        FormField::RelatedDropdown => {
            let related_label = to_title_words(without_id_suffix(column.snake()));
            builder.lines(&format!(
                r#"{camel}AsyncValue.when(
  loading: () => const CircularProgressIndicator(),
  error: (err, stack) => Text('Error: $err'),
  data: (items) => DropdownButtonFormField<int>(
    decoration: const InputDecoration(labelText: '{related_label}'),
    value: current{cap},
    onChanged: (int? newValue) {{
      current{cap} = newValue;
    }},
    items: items.map<DropdownMenuItem<int>>((item) {{
      return DropdownMenuItem<int>(
        value: item.id,
        child: Text(item.id.toString()),
      );
    }}).toList(),
    hint: const Text('Select {related_label}'),
  ),
),"#
            ))
        }
        FormField::EnumDropdown(sql_enum) => {
            let enum_class = &sql_enum.name.capitalized;
            let item = &sql_enum.name.camel;
            builder.lines(&format!(
                r#"DropdownButtonFormField<String>(
  decoration: const InputDecoration(labelText: '{label}'),
  value: current{cap},
  onChanged: (String? newValue) {{
    current{cap} = newValue;
  }},
  items: {enum_class}.all.map(({item}) {{
    return DropdownMenuItem(
      value: {item}.toString(),
      child: Text({item}.toString()),
    );
  }}).toList(),
  hint: const Text('Select {label}'),
),"#
            ))
        }
        FormField::Multiline => builder.lines(&format!(
            r#"TextFormField(
  controller: {camel}Controller,
  decoration: const InputDecoration(labelText: '{label}'),
  keyboardType: TextInputType.multiline,
  minLines: 2,
  maxLines: 8,
),"#
        )),
        FormField::Text => builder.lines(&format!(
            r#"TextFormField(
  controller: {camel}Controller,
  decoration: const InputDecoration(labelText: '{label}'),
),"#
        )),
        FormField::Numeric => builder.lines(&format!(
            r#"TextFormField(
  controller: {camel}Controller,
  decoration: const InputDecoration(labelText: '{label}'),
  keyboardType: const TextInputType.numberWithOptions(decimal: true),
),"#
        )),
    }
}

fn render_modal_actions(
    builder: CodeBuilder,
    camel: &str,
    class: &str,
    columns: &[ViewColumn<'_>],
) -> CodeBuilder {
    builder.block_with_close("Row(", "),", |b| {
        b.block_with_close("children: [", "],", |b| {
            b.lines(
                r#"TextButton(
  child: const Text('Cancel'),
  onPressed: () {
    Navigator.of(context).pop(false);
  },
),"#,
            )
            .block_with_close("TextButton(", "),", |b| {
                b.line("child: const Text('Save'),")
                    .block_with_close("onPressed: () async {", "},", |b| {
                        b.line(&format!(
                            "await ref.read({camel}Provider.notifier).upsert("
                        ))
                        .indent()
                        .block_with_close(&format!("{class}Model("), "),", |b| {
                            columns
                                .iter()
                                .fold(b, |b, c| b.line(&c.save_argument(camel)))
                        })
                        .dedent()
                        .line(");")
                        .line("if (context.mounted) {")
                        .indent()
                        .line("Navigator.of(context).pop(true);")
                        .dedent()
                        .line("}")
                    })
            })
        })
    })
}

impl GeneratedFile for ViewDart<'_> {
    fn path(&self, base: &Path) -> PathBuf {
        base.join("lib")
            .join("views")
            .join(format!("{}_view.dart", self.table.name.original))
    }

    fn render(&self) -> String {
        let columns = self.columns();

        let mut builder = CodeBuilder::dart();
        builder.push_lines(&self.imports(&columns).render());

        let builder = self.render_view(builder.blank(), &columns).blank();
        self.render_modal(builder, &columns).build()
    }
}
