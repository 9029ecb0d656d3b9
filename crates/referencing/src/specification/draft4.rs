use serde_json::Value;

use crate::{Error, Resolver, ResourceRef, Segments};

use super::subresources::{self, SubresourceIterator};

const IN_VALUE: &[&str] = &["additionalItems", "additionalProperties", "not"];
const IN_SUBARRAY: &[&str] = &["allOf", "anyOf", "oneOf"];
const IN_SUBVALUES: &[&str] = &["definitions", "patternProperties", "properties"];

pub(crate) fn subresources_of(contents: &Value) -> SubresourceIterator<'_> {
    subresources::subresources_of_with_dependencies(contents, IN_VALUE, IN_SUBVALUES, IN_SUBARRAY)
}

pub(crate) fn maybe_in_subresource<'r>(
    segments: &Segments,
    resolver: &Resolver<'r>,
    subresource: ResourceRef<'r>,
) -> Result<Resolver<'r>, Error> {
    const IN_CHILD: &[&str] = &[
        "allOf",
        "anyOf",
        "oneOf",
        "definitions",
        "patternProperties",
        "properties",
    ];
    subresources::maybe_in_subresource_with_items_and_dependencies(
        segments,
        resolver,
        subresource,
        IN_VALUE,
        IN_CHILD,
    )
}
