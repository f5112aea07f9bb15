mod test_distance;
mod test_points;
