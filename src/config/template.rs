/// Generate the starter config written by `import-rename --init`.
pub fn generate_init_template() -> String {
	r#"# import-rename configuration
#
# Rules are tried in order, the first one that matches an import path wins.
# Config files in parent directories are consulted too, unless `root = true`.

root = true

# Skip ~/.import-rename.toml when this variable is set (e.g. on CI).
# root-config-lookup-disable-env-var = "CI"

# Replace a prefix. A prefix ending in / also matches the bare path.
[[rules]]
rule = "github.com/old-org/ => github.com/new-org/"
description = "organisation moved"

# Bump the major version suffix: `++` for one step, `+= N` for N steps.
# [[rules]]
# rule = "github.com/new-org/project ++"

# Regexp with a substitution template.
# [[rules]]
# rule = '^gen/(.*)$ // example.com/schema/$1'
"#
	.to_string()
}
