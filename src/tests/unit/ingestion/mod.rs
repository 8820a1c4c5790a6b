mod stat_block_tests;
