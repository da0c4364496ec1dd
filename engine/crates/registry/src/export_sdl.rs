use std::fmt::Write;

use crate::{ObjectType, OperationKind, Registry};

impl Registry {
    /// Renders the declared schema surface as SDL, for documentation and
    /// introspection purposes.
    pub fn export_sdl(&self) -> String {
        let mut sdl = String::new();

        for ty in self.object_types() {
            export_type(ty, &mut sdl);
        }

        export_root(self, OperationKind::Query, &mut sdl);
        export_root(self, OperationKind::Mutation, &mut sdl);

        let query = if self.operations(OperationKind::Query).next().is_some() {
            "\tquery: Query\n"
        } else {
            ""
        };
        let mutation = if self.operations(OperationKind::Mutation).next().is_some() {
            "\tmutation: Mutation\n"
        } else {
            ""
        };
        if !(query.is_empty() && mutation.is_empty()) {
            writeln!(sdl, "schema {{\n{query}{mutation}}}").ok();
        }

        sdl
    }
}

fn export_type(ty: &ObjectType, sdl: &mut String) {
    writeln!(sdl, "type {} {{", ty.name).ok();
    for field in &ty.fields {
        writeln!(sdl, "\t{}: {}", field.name, field.ty).ok();
    }
    writeln!(sdl, "}}").ok();
}

fn export_root(registry: &Registry, kind: OperationKind, sdl: &mut String) {
    let mut operations = registry.operations(kind).peekable();
    if operations.peek().is_none() {
        return;
    }

    writeln!(sdl, "type {kind} {{").ok();
    for operation in operations {
        if let Some(description) = &operation.description {
            writeln!(sdl, "\t\"\"\"\n\t{}\n\t\"\"\"", description.replace('\n', "\n\t")).ok();
        }
        if operation.arguments.is_empty() {
            writeln!(sdl, "\t{}: {}", operation.name, operation.ty).ok();
        } else {
            write!(sdl, "\t{}(", operation.name).ok();
            for (i, argument) in operation.arguments.iter().enumerate() {
                if i != 0 {
                    write!(sdl, ", ").ok();
                }
                write!(sdl, "{argument}").ok();
            }
            writeln!(sdl, "): {}", operation.ty).ok();
        }
    }
    writeln!(sdl, "}}").ok();
}
