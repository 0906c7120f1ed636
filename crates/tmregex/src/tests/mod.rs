mod anchors;
mod back_references;
