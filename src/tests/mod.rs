mod test_sweep;
